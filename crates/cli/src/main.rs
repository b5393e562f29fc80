//! Restaurant API CLI - database setup and account management.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the schema
//! resto-cli migrate
//!
//! # Create a staff account
//! resto-cli user create -e kasir@resto.id -n "Kasir Satu" -p rahasia123 -r cashier
//!
//! # Issue an API key for an existing user
//! resto-cli apikey create -e kasir@resto.id -n "pos-terminal"
//!
//! # Remove expired login tokens
//! resto-cli tokens prune
//! ```
//!
//! All commands read the database URL from `RESTO_DATABASE_URL` (or
//! `DATABASE_URL`), loading `.env` if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "resto-cli")]
#[command(author, version, about = "Restaurant API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage API keys
    Apikey {
        #[command(subcommand)]
        action: ApiKeyAction,
    },
    /// Manage login tokens
    Tokens {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Initial password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`admin`, `cashier`, `customer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[derive(Subcommand)]
enum ApiKeyAction {
    /// Issue a key for a user and print it once
    Create {
        /// Email of the owning user
        #[arg(short, long)]
        email: String,

        /// Label for the key
        #[arg(short, long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Delete expired bearer tokens
    Prune,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
                role,
            } => {
                commands::user::create(&email, &name, &password, &role).await?;
            }
        },
        Commands::Apikey { action } => match action {
            ApiKeyAction::Create { email, name } => {
                commands::apikey::create(&email, &name).await?;
            }
        },
        Commands::Tokens { action } => match action {
            TokenAction::Prune => commands::tokens::prune().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "resto-cli", "user", "create", "-e", "a@resto.id", "-n", "A", "-p", "rahasia123",
        ])
        .expect("parses");
        match cli.command {
            Commands::User {
                action: UserAction::Create { role, .. },
            } => assert_eq!(role, "admin"),
            _ => panic!("wrong subcommand"),
        }
    }
}
