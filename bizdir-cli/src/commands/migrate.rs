//! Migrate command: create tables and indexes, then exit

use anyhow::{Context, Result};
use clap::Parser;

use bizdir_server::db::{connect_pool, migrations};

use crate::config::BizdirConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &BizdirConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;

    // Migrations run sequentially on one connection
    let pool = connect_pool(&database_url, 1)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("Tables and indexes are up to date");
    Ok(())
}
