// BizChat Conversation Core
// Sanitize -> classify -> respond, with a short per-user context lookback.

mod brain;
mod config;
mod context;
mod engine;
mod error;
mod models;
mod responses;
mod sanitizer;

#[cfg(test)]
mod tests;

use anyhow::Context;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::engine::ChatEngine;
use crate::error::ChatError;
use crate::models::TurnRequest;

fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("bizchat-core".into(), std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_telemetry();

    let config = ChatConfig::from_env().context("failed to load configuration")?;
    let engine = ChatEngine::from_config(&config).context("failed to build chat engine")?;

    // Anonymous identity is allowed; mint one when none is configured.
    let user_id = config
        .user_id
        .clone()
        .unwrap_or_else(|| format!("anon-{}", Uuid::new_v4()));

    info!(user = %user_id, "conversation core ready");

    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut lines = stdin.lines();

    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let request = TurnRequest::new(line, user_id.clone());
        match engine.handle_message(&request).await {
            Ok(turn) => {
                stdout
                    .write_all(format!("{}\n", turn.reply).as_bytes())
                    .await?;
            }
            Err(ChatError::InvalidInput(reason)) => {
                stdout
                    .write_all(format!("Rejected: {}\n", reason).as_bytes())
                    .await?;
            }
            Err(e) => anyhow::bail!("conversation turn failed: {}", e),
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
