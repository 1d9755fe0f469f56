//! bizdir CLI - business directory HTTP API
//!
//! Entry point for the `bizdir` binary:
//! - `serve` runs the HTTP API (businesses, reviews, photos)
//! - `migrate` creates missing tables and indexes

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

use config::BizdirConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bizdir",
    author,
    version,
    about = "Business directory API: businesses, reviews and photos over HTTP",
    long_about = "Serve a JSON API for businesses, their reviews and photos, backed by Postgres. \
                  Request bodies are checked against per-resource field schemas before any \
                  database work."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.bizdir/config.toml if present)
    #[arg(long, global = true, env = "BIZDIR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed arguments
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.bizdir)");
    } else {
        for path in &env_files {
            info!("Loaded environment from {}", path.display());
        }
    }

    let config = BizdirConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await,
    }
}
