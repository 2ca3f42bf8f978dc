//! Kakao OAuth client: authorize URL, code exchange and token refresh.

use std::time::Duration;

use serde::Deserialize;

pub const AUTHORIZE_URL: &str = "https://kauth.kakao.com/oauth/authorize";
pub const TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";

/// Scope needed to send "talk to me" messages.
pub const SCOPE: &str = "talk_message";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub rest_api_key: String,
    pub redirect_uri: String,
    pub client_secret: Option<String>,
    pub token_url: String,
}

impl KakaoConfig {
    pub fn new(rest_api_key: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            rest_api_key: rest_api_key.into(),
            redirect_uri: redirect_uri.into(),
            client_secret: None,
            token_url: TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KakaoError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Kakao answered with an OAuth error body.
    #[error("Kakao OAuth error {error}: {description}")]
    Provider { error: String, description: String },

    #[error("Kakao returned HTTP {0}")]
    HttpStatus(u16),
}

/// Token endpoint response. `refresh_token` is absent on refreshes that do
/// not rotate it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct KakaoTokens {
    pub access_token: String,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token_expires_in: Option<i64>,
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    error_description: Option<String>,
}

pub struct KakaoClient {
    client: reqwest::Client,
    config: KakaoConfig,
}

impl KakaoClient {
    pub fn new(config: KakaoConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Consent page URL; `state` comes back untouched on the redirect.
    pub fn auth_url(&self, state: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={SCOPE}&state={}",
            urlencoding::encode(&self.config.rest_api_key),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<KakaoTokens, KakaoError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.rest_api_key.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        self.token_request(&form).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<KakaoTokens, KakaoError> {
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.config.rest_api_key.as_str()),
            ("refresh_token", refresh_token),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        self.token_request(&form).await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<KakaoTokens, KakaoError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Kakao token request failed");
            return Err(parse_error(status.as_u16(), &text));
        }

        Ok(response.json::<KakaoTokens>().await?)
    }
}

fn parse_error(status: u16, body: &str) -> KakaoError {
    match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(e) => KakaoError::Provider {
            description: e.error_description.unwrap_or_else(|| e.error.clone()),
            error: e.error,
        },
        Err(_) => KakaoError::HttpStatus(status),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn client() -> KakaoClient {
        KakaoClient::new(KakaoConfig::new(
            "rest-key",
            "http://localhost:5001/api/oauth/kakao/callback",
        ))
    }

    #[test]
    fn auth_url_encodes_redirect_and_state() {
        let url = client().auth_url("a b");
        assert!(url.starts_with("https://kauth.kakao.com/oauth/authorize?client_id=rest-key"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A5001%2Fapi%2Foauth%2Fkakao%2Fcallback"
        ));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=talk_message"));
        assert!(url.ends_with("state=a%20b"));
    }

    #[test]
    fn oauth_error_body_is_parsed() {
        let err = parse_error(
            400,
            r#"{"error":"invalid_grant","error_description":"authorization code not found"}"#,
        );
        assert_matches!(err, KakaoError::Provider { ref error, ref description }
            if error == "invalid_grant" && description == "authorization code not found");
    }

    #[test]
    fn non_json_error_keeps_status() {
        assert_matches!(parse_error(502, "<html>"), KakaoError::HttpStatus(502));
    }

    #[test]
    fn refresh_response_without_refresh_token() {
        let tokens: KakaoTokens =
            serde_json::from_str(r#"{"access_token":"new","token_type":"bearer","expires_in":21599}"#)
                .unwrap();
        assert_eq!(tokens.access_token, "new");
        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.expires_in, Some(21599));
    }
}
