#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use hvlab_api::auth::jwt::{generate_access_token, JwtConfig};
use hvlab_api::auth::password::hash_password;
use hvlab_api::config::ServerConfig;
use hvlab_api::router::build_app_router;
use hvlab_api::state::AppState;
use hvlab_api::ws::WsManager;
use hvlab_db::repositories::UserRepo;
use hvlab_db::{DbPool, SeedOptions};
use hvlab_events::EventBus;
use hvlab_notify::{KakaoClient, RecordingSms, SmsSender};
use serde_json::Value;
use tower::ServiceExt;

/// Password every seeded account starts with.
pub const SEED_PASSWORD: &str = "0109";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_env: "test".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 168,
        },
        public_app_url: "https://hvlab.app".to_string(),
        notification_phone: None,
        coolsms: None,
        kakao: None,
        volume_mount_path: None,
        uploads_dir: test_uploads_dir(),
        seed_default_password: SEED_PASSWORD.to_string(),
        contractor_seed_file: None,
    }
}

/// Per-process scratch directory for uploaded files.
pub fn test_uploads_dir() -> String {
    std::env::temp_dir()
        .join(format!("hvlab-test-uploads-{}", std::process::id()))
        .to_string_lossy()
        .into_owned()
}

/// Argon2 is slow in debug builds; hash the seed password once per test binary.
fn seed_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(SEED_PASSWORD).expect("hash seed password"))
        .clone()
}

/// In-memory database with the schema and default rows in place.
pub async fn test_pool() -> DbPool {
    let pool = hvlab_db::create_memory_pool()
        .await
        .expect("create in-memory pool");
    let seed = SeedOptions {
        default_password_hash: seed_hash(),
        contractors: Vec::new(),
    };
    let report = hvlab_db::run_migrations(&pool, &seed).await;
    assert!(report.failures.is_empty(), "migration failures: {:?}", report.failures);
    pool
}

/// A fully wired application over an in-memory database.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    pub state: AppState,
    pub sms: Arc<RecordingSms>,
}

impl TestApp {
    /// Fresh app whose SMS sender records messages instead of sending them.
    pub async fn new() -> Self {
        let sms = Arc::new(RecordingSms::new());
        let mut app = Self::with_sms(Arc::clone(&sms) as Arc<dyn SmsSender>).await;
        app.sms = sms;
        app
    }

    /// Fresh app with a caller-supplied SMS sender.
    pub async fn with_sms(sender: Arc<dyn SmsSender>) -> Self {
        Self::with_config(test_config(), sender).await
    }

    pub async fn with_config(config: ServerConfig, sender: Arc<dyn SmsSender>) -> Self {
        let pool = test_pool().await;
        let state = AppState {
            pool: pool.clone(),
            config: Arc::new(config.clone()),
            ws_manager: Arc::new(WsManager::new()),
            event_bus: Arc::new(EventBus::default()),
            sms: sender,
            kakao: config.kakao.clone().map(|k| Arc::new(KakaoClient::new(k))),
        };
        let router = build_app_router(state.clone(), &config);
        Self {
            router,
            pool,
            state,
            sms: Arc::new(RecordingSms::new()),
        }
    }

    /// Bearer token for one of the seeded accounts.
    pub async fn token_for(&self, username: &str) -> String {
        let user = UserRepo::find_by_username(&self.pool, username)
            .await
            .expect("query user")
            .expect("seeded user exists");
        generate_access_token(user.id, &user.username, &user.role, &self.state.config.jwt)
            .expect("generate token")
    }

    /// Database id of a seeded account.
    pub async fn user_id(&self, username: &str) -> i64 {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .expect("query user")
            .expect("seeded user exists")
            .id
    }

    /// Token for the seeded admin.
    pub async fn admin_token(&self) -> String {
        self.token_for("상준").await
    }

    /// Token for the seeded manager.
    pub async fn manager_token(&self) -> String {
        self.token_for("신애").await
    }

    /// Token for a seeded field worker.
    pub async fn worker_token(&self) -> String {
        self.token_for("재천").await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(json).expect("serialize body"))
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).expect("build request"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> axum::response::Response {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> axum::response::Response {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> axum::response::Response {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> axum::response::Response {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> axum::response::Response {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> axum::response::Response {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> axum::response::Response {
    send(app, "PATCH", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> axum::response::Response {
    send(app, "DELETE", uri, Some(token), None).await
}

/// One part of a `multipart/form-data` body.
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

const BOUNDARY: &str = "hvlab-test-boundary";

fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a `multipart/form-data` request with a bearer token.
pub async fn multipart_auth(
    app: &Router,
    method: &str,
    uri: &str,
    parts: &[FormPart<'_>],
    token: &str,
) -> axum::response::Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("build request");
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Collect a response body as text.
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// Assert the status and return the JSON body.
pub async fn expect_json(response: axum::response::Response, status: StatusCode) -> Value {
    let actual = response.status();
    let body = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {body}");
    body
}
