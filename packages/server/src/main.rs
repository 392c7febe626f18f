// Main entry point for the job intel API server

use anyhow::{Context, Result};
use job_intel::{AgentConfig, JobIntel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_intel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job intel API server");

    let config = AgentConfig::from_env().context("Failed to load configuration")?;
    let agent = JobIntel::from_config(&config);

    let app = app::build_app(agent);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
