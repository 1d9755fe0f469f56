//! HTTP server command
//!
//! Connects the pool, brings the schema up to date, then serves until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use bizdir_server::db::{connect_pool, migrations};
use bizdir_server::http::{run_server, ServerConfig};

use crate::config::BizdirConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "BIZDIR_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Do not create missing tables before serving
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &BizdirConfig) -> Result<()> {
    let database_url = config.database_url(args.database_url)?;
    let bind = args.bind.unwrap_or(config.server.bind);

    tracing::info!("Starting bizdir server on {}", bind);

    let pool = connect_pool(&database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let server_config = ServerConfig {
        bind_addr: bind,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
