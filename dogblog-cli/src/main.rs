//! dogblog CLI - run and configure the dogblog server
//!
//! - `serve`: start the HTTP server against Postgres (or `--memory`)
//! - `config`: create, locate, and inspect the configuration file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::BlogConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "dogblog",
    author,
    version,
    about = "A small server-rendered blog with accounts and owner-scoped posts"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.dogblog/config.toml)
    #[arg(long, short = 'c', global = true, env = "DOGBLOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the blog HTTP server
    Serve(commands::serve::ServeArgs),
    /// Manage dogblog configuration (init, path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win over it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => {
            let config = BlogConfig::load(cli.config.as_deref())?.with_env();
            commands::serve::run_serve(args, config).await
        }
        Commands::Config(args) => config::run_config(args, cli.config.as_deref()),
    }
}
