//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

/// Largest sample set `--seed` will insert.
pub const MAX_SEED_COUNT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "reunions", version, about = "JSON:API backend for reunion events")]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "REUNIONS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite database file, or `:memory:`.
    #[arg(long, env = "REUNIONS_DATABASE", default_value = ".data/reunions.db")]
    pub database: PathBuf,

    #[arg(long, env = "REUNIONS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Insert this many sample reunions before serving.
    #[arg(long, value_name = "COUNT")]
    pub seed: Option<usize>,
}

impl ServerConfig {
    /// Fail-fast checks run before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            bail!("database path cannot be empty");
        }
        if let Some(count) = self.seed {
            if count > MAX_SEED_COUNT {
                bail!("--seed accepts at most {MAX_SEED_COUNT} reunions, got {count}");
            }
        }
        Ok(())
    }
}
