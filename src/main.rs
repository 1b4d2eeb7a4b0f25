//! ClinicAssist - terminal client for phase-gated clinical intake
//!
//! Drives a guided intake conversation against a remote dialogue service
//! and shows the extracted patient record as it grows.

mod api;
mod config;
mod console;
mod intake;
mod runtime;
mod state_machine;

use api::{HttpDialogueClient, LoggingClient};
use config::AppConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_assist=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = AppConfig::from_env();
    let client = HttpDialogueClient::new(&config.api)?;
    tracing::info!(
        api = %client.base_url(),
        timeout_secs = config.controller.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let client = LoggingClient::new(Arc::new(client));
    let handle = runtime::spawn_session(client, config.controller);

    console::run(handle).await?;

    tracing::info!("Exiting");
    Ok(())
}
