pub mod funnel;
pub mod import;
pub mod init;
pub mod services;
pub mod sources;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "leadline", about = "Sales-funnel importer CLI for small booking studios.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Leadline: choose a data directory.
    Init {
        /// Path for Leadline data (default: ~/Documents/leadline)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a CRM report export (CSV).
    Import {
        /// Path to the CSV export
        file: String,
        /// Report kind: funnel or bookings
        #[arg(long, default_value = "funnel")]
        kind: String,
        /// Owner identifier stamped on created bookings
        #[arg(long)]
        owner: Option<String>,
        /// Import even if this exact file was imported before
        #[arg(long)]
        force: bool,
    },
    /// Show the monthly sales funnel.
    Funnel {
        /// Year filter: YYYY
        #[arg(long)]
        year: Option<i32>,
    },
    /// Manage service types.
    Services {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage lead sources.
    Sources {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Show the data directory and record counts.
    Status,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Add an entry.
    Add {
        /// Display name, e.g. 'Instagram'
        name: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List all entries.
    List,
}
