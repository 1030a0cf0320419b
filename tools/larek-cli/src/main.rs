//! Larek CLI - browse the catalog and place orders from a terminal.
//!
//! Commands:
//! - `larek shop` - Interactive storefront (default)
//! - `larek catalog` - Print the product catalog
//! - `larek config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, ConfigArgs, ShopArgs};

/// Larek CLI - a storefront for web developers, in your terminal
#[derive(Parser)]
#[command(name = "larek")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "LAREK_API_URL")]
    api_url: Option<String>,

    /// CDN base URL for product images
    #[arg(long, global = true, env = "LAREK_CDN_URL")]
    cdn_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive storefront
    Shop(ShopArgs),

    /// Print the product catalog
    Catalog(CatalogArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config, then apply flag/env overrides
    let mut ctx = context::Context::load(cli.config.as_deref(), output)?;
    ctx.config.api.apply_overrides(cli.api_url, cli.cdn_url);
    ctx.output.debug(&format!("API: {}", ctx.config.api.base_url));

    // Execute command
    let command = cli.command.unwrap_or(Commands::Shop(ShopArgs::default()));
    let result = match command {
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
