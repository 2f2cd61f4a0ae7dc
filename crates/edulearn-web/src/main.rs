//! Serve the course generator page.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p edulearn-web
//! cargo run -p edulearn-web -- --port 8080
//! cargo run -p edulearn-web -- --model gpt-4o-mini
//! cargo run -p edulearn-web -- --api-base-url http://localhost:8080/v1/chat/completions
//! ```
//!
//! Then open the printed URL and enter a course title and API key.

use std::net::IpAddr;

use clap::Parser;
use edulearn::config::{CourseConfig, DEFAULT_MODEL, OPENAI_CHAT_URL};
use edulearn_web::{WebConfig, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Browser UI for generating course packages.
#[derive(Parser)]
#[command(name = "edulearn-web", version)]
struct Args {
    /// Port for the web UI server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Model to use.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat-completion endpoint URL.
    #[arg(long, default_value = OPENAI_CHAT_URL)]
    api_base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = WebConfig {
        bind_addr: (args.bind, args.port).into(),
        course: CourseConfig::default()
            .with_model(&args.model)
            .with_api_base_url(&args.api_base_url),
    };

    let addr = spawn_web(config)
        .await
        .map_err(|e| format!("failed to start server: {e}"))?;
    info!("model {} via {}", args.model, args.api_base_url);
    println!("Web UI: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to wait for shutdown signal: {e}"))?;
    info!("shutting down");
    Ok(())
}
