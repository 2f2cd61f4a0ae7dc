//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::api::{self, AppState};
use crate::page;

/// Build the full axum router.
///
/// The router serves:
/// - The single-page form at `/`
/// - REST API at `/api/*`
pub fn build_router(app_state: AppState) -> Router {
    // Permissive CORS so the API can be driven from other local pages.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/info", get(api::get_info))
        .route("/api/generate", post(api::post_generate))
        .with_state(app_state);

    Router::new()
        .route("/", get(page::index))
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `bind_addr`, serve `router` on a background task and return the
/// bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("web server stopped: {e}");
        }
    });

    Ok(addr)
}
