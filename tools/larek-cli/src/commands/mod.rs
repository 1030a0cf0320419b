//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the shop command.
#[derive(Args, Default)]
pub struct ShopArgs {
    /// Skip the confirmation prompt on exit with a non-empty cart.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Filter by category (case-insensitive substring).
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default larek.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
