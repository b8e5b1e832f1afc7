//! neutrino CLI - search façade over a hosted search index
//!
//! This binary provides the command-line interface for running the REST
//! server and for one-off queries against the configured backend.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neutrino_core::config::Config;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neutrino")]
#[command(about = "Search façade over a hosted search index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST server
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one query against the configured backend and print the results
    Search {
        /// Query text
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute commands
    match cli.command {
        Some(Commands::Serve { port }) => serve(cli.config.as_deref(), port).await,
        Some(Commands::Search { query }) => search(cli.config.as_deref(), &query).await,
        None => {
            // Default behavior - show help
            println!("Run 'neutrino serve' to start the REST server, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
///
/// `RUST_LOG` takes precedence over the `--verbose` flag when set.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "neutrino={level},neutrino_core={level},neutrino_search_client={level},neutrino_server={level},tower_http={level}"
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Start the REST server
async fn serve(config_path: Option<&Path>, port: Option<u16>) -> Result<()> {
    info!("Preparing to start neutrino REST server...");

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    info!(
        "Search backend: provider={}, index={}",
        config.search.provider,
        config.search.index_name.as_deref().unwrap_or("<none>")
    );

    neutrino_server::run_server(config)
        .await
        .context("REST server failed")?;
    Ok(())
}

/// Run a single query and print the results as JSON
async fn search(config_path: Option<&Path>, query: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let backend = neutrino_search_client::create_search_backend(&config.search)
        .context("Failed to create search backend")?;

    let results = neutrino_core::SearchBackend::search(backend.as_ref(), query)
        .await
        .context("Search request failed")?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
