use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hvlab_api::auth::password::hash_password;
use hvlab_api::config::ServerConfig;
use hvlab_api::notifications::NotificationRouter;
use hvlab_api::router::build_app_router;
use hvlab_api::state::AppState;
use hvlab_api::ws;
use hvlab_db::migrations::SeedContractor;
use hvlab_db::SeedOptions;
use hvlab_notify::{CoolSmsClient, DisabledSms, KakaoClient, SmsSender};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hvlab_api=debug,hvlab_db=info,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        env = %config.app_env,
        sms = config.coolsms.is_some(),
        kakao = config.kakao.is_some(),
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = hvlab_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    hvlab_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    let seed = SeedOptions {
        default_password_hash: hash_password(&config.seed_default_password)
            .expect("Failed to hash seed password"),
        contractors: load_contractor_seed(config.contractor_seed_file.as_deref()),
    };
    let report = hvlab_db::run_migrations(&pool, &seed).await;
    tracing::info!(
        tables = report.tables_ensured,
        columns_added = report.columns_added.len(),
        seeded = ?report.seeded,
        failures = report.failures.len(),
        "Database migrations applied"
    );

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus ---
    let event_bus = Arc::new(hvlab_events::EventBus::default());

    // Spawn notification router (pushes events to browsers via WebSocket).
    let notification_router = NotificationRouter::new(Arc::clone(&ws_manager));
    let router_handle = tokio::spawn(notification_router.run(event_bus.subscribe()));
    tracing::info!("Event bus and notification router started");

    // --- Outbound providers ---
    let sms: Arc<dyn SmsSender> = match config.coolsms.clone() {
        Some(coolsms) => Arc::new(CoolSmsClient::new(coolsms)),
        None => {
            tracing::warn!("CoolSMS credentials missing, SMS sending disabled");
            Arc::new(DisabledSms)
        }
    };
    let kakao = config.kakao.clone().map(|k| Arc::new(KakaoClient::new(k)));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        sms,
        kakao,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel and ends the router loop.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), router_handle).await;
    tracing::info!("Notification router shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Read the contractor directory seed file. A missing or malformed file
/// only skips contractor seeding.
fn load_contractor_seed(path: Option<&str>) -> Vec<SeedContractor> {
    let Some(path) = path else {
        return Vec::new();
    };
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| {
            serde_json::from_str::<Vec<SeedContractor>>(&text).map_err(|e| e.to_string())
        });
    match parsed {
        Ok(contractors) => {
            tracing::info!(path, count = contractors.len(), "Loaded contractor seed file");
            contractors
        }
        Err(error) => {
            tracing::warn!(path, %error, "Could not load contractor seed file");
            Vec::new()
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. Railway, Docker).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
