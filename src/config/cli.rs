use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "corp-census")]
#[command(about = "Company headcount search and a memory game, backed by the census server")]
pub struct Cli {
    /// Path to an optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the server, e.g. http://localhost:5000
    #[arg(long)]
    pub server: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up employee counts for up to 50 companies
    Search {
        /// Company names; read one per line from --file or stdin when omitted
        names: Vec<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Also write the rendered table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show the memory-game leaderboard
    Leaderboard,
    /// Play the memory game in the terminal
    Play {
        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    /// Defaults, overridden by the settings file, overridden by flags.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_toml(&TomlConfig::from_file(path)?),
            None => ClientConfig::default(),
        };

        if let Some(server) = &self.server {
            config.server_url = server.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if let Command::Play { seed: Some(seed) } = &self.command {
            config.seed = Some(*seed);
        }
        Ok(config)
    }
}
