//! Browser front end for the edulearn course generator.
//!
//! `edulearn-web` serves a single page with a course title field, an API key
//! field and a generate button, plus the JSON API the page calls. The API key
//! stays in the browser's `localStorage` and travels with each request; the
//! server holds only the model configuration.
//!
//! # Quick start
//!
//! ```ignore
//! use edulearn_web::{WebConfig, spawn_web};
//!
//! let addr = spawn_web(WebConfig::default()).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Endpoints
//!
//! | Method | Path            | Body                          |
//! |--------|-----------------|-------------------------------|
//! | GET    | `/`             | HTML page                     |
//! | GET    | `/api/info`     | title, version, page texts    |
//! | POST   | `/api/generate` | `{course_title, api_key}` in  |
//!
//! A failed generate answers `400` for input problems and `502` when the
//! model API fails, both with `{"error": "..."}`.

pub mod api;
mod page;
pub mod server;

pub use api::AppState;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use edulearn::OpenAiClient;
use edulearn::config::CourseConfig;

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Model and endpoint settings used for every generate request.
    pub course: CourseConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            course: CourseConfig::default(),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(config: WebConfig) -> io::Result<SocketAddr> {
    let client = OpenAiClient::new(&config.course).map_err(io::Error::other)?;
    let state = AppState {
        client: Arc::new(client),
        config: Arc::new(config.course),
    };
    let router = server::build_router(state);
    server::start_server(router, config.bind_addr).await
}
