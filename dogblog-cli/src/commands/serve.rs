//! HTTP server command
//!
//! Resolves the effective settings (flags over environment over config file),
//! picks a store, and runs the server until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use dogblog_server::{run_server, BlogStore, MemoryStore, PgStore, ServerConfig};

use crate::config::BlogConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Directory of static assets served for unmatched paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Keep everything in memory instead of Postgres (data is lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub memory: bool,
}

impl ServeArgs {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply_to(&self, mut config: BlogConfig) -> BlogConfig {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: BlogConfig) -> Result<()> {
    let config = args.apply_to(config);

    let store: Arc<dyn BlogStore> = if args.memory {
        tracing::warn!("Using in-memory store; all accounts and posts are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = config.database.url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or [database] url in the config file",
        )?;

        let store = PgStore::connect(database_url, config.database.max_connections)
            .await
            .context("Failed to create database pool")?;
        tracing::info!(
            max_connections = config.database.max_connections,
            "Connected to PostgreSQL"
        );
        Arc::new(store)
    };

    tracing::info!("Starting dogblog server on {}", config.server.bind);

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
        static_dir: config.server.static_dir,
    };

    // Run server (blocks until shutdown)
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
