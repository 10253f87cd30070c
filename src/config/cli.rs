use std::path::PathBuf;

use clap::Parser;

/// abf: an anti-bruteforce filter guarding an authentication endpoint.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Load and validate configuration, then exit without starting the
    /// server.
    #[arg(long)]
    pub validate_configs: bool,
}
