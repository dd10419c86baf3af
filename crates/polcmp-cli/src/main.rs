//! policy-compare CLI
//!
//! Fetches two policies from the workload security API and reports how they
//! differ.

use clap::{Parser, Subcommand};
use polcmp_connector::Connector;
use polcmp_core::logging_facility::{self, Profile};

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "policy-compare")]
#[command(about = "Compare two workload security policies", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: settings::Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two policies by ID
    Compare(commands::compare::CompareArgs),
    /// List all policies that are not cloud-managed
    List,
    /// Resolve a policy ID by name
    Find(commands::find::FindArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging_facility::init(match cli.settings.log_format {
        settings::LogFormat::Pretty => Profile::Development,
        settings::LogFormat::Json => Profile::Production,
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let connector = Connector::new(cli.settings.connector_config()?)?;

    match cli.command {
        Commands::Compare(args) => commands::compare::execute(&connector, args),
        Commands::List => commands::list::execute(&connector),
        Commands::Find(args) => commands::find::execute(&connector, args),
    }
}
