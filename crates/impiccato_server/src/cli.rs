//! Command-line interface for impiccato.

use clap::{Parser, Subcommand};

/// Impiccato - hangman with the secret kept on the server
#[derive(Parser, Debug)]
#[command(name = "impiccato")]
#[command(about = "Server-authoritative hangman game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a game in the terminal
    Play {
        /// Phrase for a multiplayer game. Without it a random phrase is drawn.
        #[arg(long)]
        phrase: Option<String>,

        /// Path to a TOML config file (for a custom dictionary)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}
