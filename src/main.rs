//! Weekly Shift Allocator - Axum Server
//!
//! Run with: cargo run --bin shift-allocator

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};

use shift_allocator::api::{self, AppState};
use shift_allocator::config::AppConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load().expect("failed to load configuration");
    let port = config.port;

    let cors = match config.frontend_url.as_str() {
        "*" => CorsLayer::new().allow_origin(Any),
        origin => {
            let origin: axum::http::HeaderValue = origin
                .parse()
                .unwrap_or_else(|_| panic!("FRONTEND_URL is not a valid origin: {origin}"));
            CorsLayer::new().allow_origin(origin)
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let state = AppState { config: Arc::new(config) };

    let app = api::router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "starting shift-allocator");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
