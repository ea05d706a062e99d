use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod routes;

/// Server state. A store is opened per request - access is
/// request-per-call, there is no shared connection.
pub struct AppState {
    pub database_path: PathBuf,
}

pub async fn start_server(port: u16, database_path: PathBuf) -> anyhow::Result<()> {
    let state = Arc::new(AppState { database_path });

    let app = Router::new()
        .route("/api/signs", get(routes::list_signs))
        .route("/api/sign/{id}", get(routes::get_sign))
        .route("/api/search", get(routes::search))
        .route("/api/filters", get(routes::get_filters))
        .route("/api/stats", get(routes::get_stats))
        .fallback_service(ServeDir::new("ui/dist"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
