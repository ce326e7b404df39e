//! # autonews CLI
//!
//! Command-line interface for the AutoNews site server.

mod cache;
mod feeds;
mod handlers;
mod server;
mod state;

use anyhow::Context;
use autonews_core::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autonews")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "autonews.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the news site server
    Serve {
        /// Override the configured server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate configuration and report the effective settings
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            server::serve(config, port).await
        }
        Commands::Check => {
            println!("Site:        {} ({})", config.site.title, config.site_origin());
            println!("Language:    {}", config.site.language);
            println!("Port:        {}", config.server.port);
            println!(
                "Store:       {}",
                match &config.store {
                    Some(store) => store.url.as_str(),
                    None => "not configured (serving embedded fallback data)",
                }
            );
            println!("Slug style:  {:?}", config.slug_dialect);
            println!("RSS:         {}", config.enable_rss);
            println!("Sitemaps:    {}", config.enable_sitemap);
            Ok(())
        }
    }
}
