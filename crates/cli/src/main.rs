//! Armour CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront schema and the session table
//! armour-cli migrate
//!
//! # Only the storefront schema
//! armour-cli migrate --skip-sessions
//!
//! # Validate the embedded product catalog and list its collections
//! armour-cli catalog
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "armour-cli")]
#[command(author, version, about = "Armour storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// Do not create the session store table
        #[arg(long)]
        skip_sessions: bool,
    },
    /// Validate the product catalog and print a summary
    Catalog,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { skip_sessions } => commands::migrate::run(!skip_sessions).await?,
        Commands::Catalog => commands::catalog::summary()?,
    }
    Ok(())
}
