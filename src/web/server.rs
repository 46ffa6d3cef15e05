//! Axum server setup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::Config;

use super::routes::api_router;
use super::state::AppState;

/// Run the web server
pub async fn run_server(config: Config, bind: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let static_dir = config.server.static_dir.clone();

    // Create shared state; the gene registry freezes here.
    let state = Arc::new(AppState::new(config));

    // CORS layer for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api_router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state);

    log::info!("starting breeding server on http://{}", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
