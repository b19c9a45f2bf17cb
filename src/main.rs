mod cli;
mod columns;
mod error;
mod fmt;
mod funnel;
mod importer;
mod models;
mod parsers;
mod resolver;
mod settings;
mod store;
mod transform;

use clap::Parser;

use cli::{CatalogCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import {
            file,
            kind,
            owner,
            force,
        } => cli::import::run(&file, &kind, owner.as_deref(), force),
        Commands::Funnel { year } => cli::funnel::run(year),
        Commands::Services { command } => match command {
            CatalogCommands::Add { name, description } => {
                cli::services::add(&name, description.as_deref())
            }
            CatalogCommands::List => cli::services::list(),
        },
        Commands::Sources { command } => match command {
            CatalogCommands::Add { name, description } => {
                cli::sources::add(&name, description.as_deref())
            }
            CatalogCommands::List => cli::sources::list(),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
