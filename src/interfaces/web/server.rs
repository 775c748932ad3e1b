use super::error_response::ErrorResponse;
use super::{AppState, download_excel, download_png, download_svg, hello};
use crate::AppConfig;
use crate::debug::debug_helpers::log_system_info;
use axum::{Router, http::StatusCode, http::Uri, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the application router with all endpoints
pub fn build_router(config: &AppConfig) -> Router {
    router_with_state(Arc::new(AppState::new(config)))
}

pub(crate) fn router_with_state(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/api/health", get(|| async { "OK" }))
        .route("/download-png/{total}", get(download_png))
        .route("/download-svg", get(download_svg))
        .route("/download-excel", get(download_excel))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .fallback(not_found)
}

pub async fn create_server(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting QR code batch server...");
    log_system_info();

    // Parse socket address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tokio::fs::create_dir_all(&config.scratch_dir).await?;
    info!("Scratch directory: {}", config.scratch_dir.display());

    let app = build_router(&config);
    let listener = TcpListener::bind(&addr).await?;

    println!("🌐 Web server started successfully!");
    println!("   URL: http://{addr}");
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn not_found(uri: Uri) -> ErrorResponse {
    ErrorResponse::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
