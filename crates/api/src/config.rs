use hvlab_notify::{CoolSmsConfig, KakaoConfig};

use crate::auth::jwt::JwtConfig;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,https://hvlab.app,https://www.hvlab.app";
const DEFAULT_KAKAO_REDIRECT_URI: &str = "http://localhost:5000/oauth/kakao";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// `development` or `production`.
    pub app_env: String,
    pub jwt: JwtConfig,
    /// Public web app origin, used in SMS completion links.
    pub public_app_url: String,
    /// Office phone that receives urgent payment alerts. `None` disables them.
    pub notification_phone: Option<String>,
    /// `None` when any CoolSMS credential is missing.
    pub coolsms: Option<CoolSmsConfig>,
    /// `None` when `KAKAO_REST_API_KEY` is unset.
    pub kakao: Option<KakaoConfig>,
    /// Railway persistent volume; drawings are served from `{path}/drawings`.
    pub volume_mount_path: Option<String>,
    pub uploads_dir: String,
    /// Plaintext password given to seeded default accounts.
    pub seed_default_password: String,
    /// Optional JSON file with the contractor directory to seed.
    pub contractor_seed_file: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `5000`                           |
    /// | `DATABASE_URL`           | `sqlite://database.db?mode=rwc`  |
    /// | `CORS_ORIGINS`           | localhost + hvlab.app origins    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `APP_ENV`                | `development`                    |
    /// | `PUBLIC_APP_URL`         | `https://hvlab.app`              |
    /// | `NOTIFICATION_PHONE_NUMBER` | unset                         |
    /// | `COOLSMS_API_KEY` / `_SECRET` / `_FROM_NUMBER` | unset      |
    /// | `KAKAO_REST_API_KEY`     | unset                            |
    /// | `KAKAO_REDIRECT_URI`     | `http://localhost:5000/oauth/kakao` |
    /// | `RAILWAY_VOLUME_MOUNT_PATH` | unset                         |
    /// | `UPLOADS_DIR`            | `uploads`                        |
    /// | `SEED_DEFAULT_PASSWORD`  | `0109`                           |
    /// | `CONTRACTOR_SEED_FILE`   | unset                            |
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let kakao = env_opt("KAKAO_REST_API_KEY").map(|key| {
            let mut config = KakaoConfig::new(
                key,
                env_or("KAKAO_REDIRECT_URI", DEFAULT_KAKAO_REDIRECT_URI),
            );
            config.client_secret = env_opt("KAKAO_CLIENT_SECRET");
            config
        });

        Self {
            host,
            port,
            database_url: env_or("DATABASE_URL", "sqlite://database.db?mode=rwc"),
            cors_origins,
            request_timeout_secs,
            app_env: env_or("APP_ENV", "development"),
            jwt: JwtConfig::from_env(),
            public_app_url: env_or("PUBLIC_APP_URL", "https://hvlab.app"),
            notification_phone: env_opt("NOTIFICATION_PHONE_NUMBER"),
            coolsms: CoolSmsConfig::new(
                env_opt("COOLSMS_API_KEY"),
                env_opt("COOLSMS_API_SECRET"),
                env_opt("COOLSMS_FROM_NUMBER"),
            ),
            kakao,
            volume_mount_path: env_opt("RAILWAY_VOLUME_MOUNT_PATH"),
            uploads_dir: env_or("UPLOADS_DIR", "uploads"),
            seed_default_password: env_or("SEED_DEFAULT_PASSWORD", "0109"),
            contractor_seed_file: env_opt("CONTRACTOR_SEED_FILE"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

/// Unset and blank values are both treated as absent.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
