mod cli;
mod config;
mod errors;
mod interview;
mod llm_client;
mod models;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::repl::Repl;
use crate::cli::Cli;
use crate::config::Config;
use crate::interview::controller::DialogueController;
use crate::interview::session::Session;
use crate::llm_client::LlmClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on a missing API key)
    let config = Config::load(&cli)?;

    // Initialize structured logging on stderr; stdout carries the interview itself
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting interviewer v{}", env!("CARGO_PKG_VERSION"));

    let resume = config
        .resume
        .load()
        .context("Failed to load resume context")?;
    info!(
        "Resume context: {}",
        if resume.is_some() { "loaded" } else { "none" }
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_settings()).context("Failed to build HTTP client")?;
    info!(
        "LLM client initialized (provider: {}, model: {})",
        llm.provider(),
        llm.model()
    );

    let controller = DialogueController::new(
        Arc::new(llm),
        Session::new(resume),
        config.generation_timeout(),
    );

    Repl::new(controller, &config)?.run().await
}
