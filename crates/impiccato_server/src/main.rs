//! Impiccato - unified CLI
//!
//! Runs the HTTP game server or a terminal game.

use anyhow::Result;
use clap::Parser;
use impiccato_server::cli::{Cli, Command};
use impiccato_server::{ServerConfig, build_service, play, serve};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => {
            let mut config = load_config(config)?;
            config.apply_env();
            config.override_bind(host, port);
            info!(host = %config.host(), port = config.port(), "Starting Impiccato server");
            serve(config).await
        }
        Command::Play { phrase, config } => {
            let config = load_config(config)?;
            let service = build_service(&config)?;
            let stdin = std::io::stdin();
            play(&service, phrase.as_deref(), stdin.lock(), std::io::stdout())?;
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ServerConfig> {
    Ok(match path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    })
}
