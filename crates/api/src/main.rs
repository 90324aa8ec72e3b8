use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use khizana_core::app::Wardrobe;
use khizana_events::{EventBus, EventLogger};
use khizana_gemini::{GeminiConfig, GeminiGateway};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use khizana_api::config::ServerConfig;
use khizana_api::router::build_app_router;
use khizana_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "khizana_api=debug,khizana_gemini=debug,khizana_events=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let categorizer = config
        .load_categorizer()
        .expect("Failed to load category rules");
    tracing::info!(
        custom_rules = config.category_rules_path.is_some(),
        "Categorizer ready"
    );

    // --- Stylist gateway ---
    let gemini_config = GeminiConfig::from_env();
    let gateway = GeminiGateway::new(&gemini_config).expect("Failed to build Gemini client");
    tracing::info!(
        text_model = %gemini_config.text_model,
        image_model = %gemini_config.image_model,
        "Gemini gateway configured"
    );

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let logger_handle = tokio::spawn(EventLogger::run(event_bus.subscribe()));

    // --- App state ---
    let state = AppState::new(
        Wardrobe::new(categorizer),
        Arc::new(gateway),
        config.clone(),
        Arc::clone(&event_bus),
    );

    // --- Router ---
    let shutdown = state.shutdown.clone();
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
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel and ends the logger.
    drop(event_bus);
    match tokio::time::timeout(Duration::from_secs(5), logger_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Event logger stopped"),
        _ => tracing::warn!("Event logger did not stop cleanly"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM, then cancel `token` so
/// open event streams end and in-flight connections can drain.
async fn shutdown_signal(token: CancellationToken) {
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

    token.cancel();
}
