//! Lex CLI - Database migrations and registry management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply registry migrations
//! lex-cli migrate
//!
//! # List clients (table or JSON)
//! lex-cli clients list
//! lex-cli clients list --json
//!
//! # Register clients
//! lex-cli clients add-individual -f Ana -l Silva -t 11122233344 -e ana@x.com
//! lex-cli clients add-organization -n "Lex Advocacia Ltda" -t 12.345.678/0001-90 -e contato@lex.com
//!
//! # Delete a client by person id
//! lex-cli clients remove 1
//! ```
//!
//! The database is selected with `REGISTRY_DATABASE_URL`, exactly as for the
//! server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lex-cli")]
#[command(author, version, about = "Lex client registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage registry clients
    Clients {
        #[command(subcommand)]
        action: ClientsAction,
    },
}

#[derive(Subcommand)]
enum ClientsAction {
    /// List all clients ordered by name
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Register a natural person as a client
    AddIndividual {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: Option<String>,

        /// CPF
        #[arg(short, long)]
        tax_id: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Register a legal entity as a client
    AddOrganization {
        /// Legal (registered) name
        #[arg(short = 'n', long)]
        legal_name: String,

        /// CNPJ
        #[arg(short, long)]
        tax_id: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Delete a client and its person record
    Remove {
        /// Person id shown by `clients list`
        person_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Clients { action } => match action {
            ClientsAction::List { json } => commands::clients::list(json).await?,
            ClientsAction::AddIndividual {
                first_name,
                last_name,
                tax_id,
                email,
            } => {
                commands::clients::add_individual(first_name, last_name, tax_id, email).await?;
            }
            ClientsAction::AddOrganization {
                legal_name,
                tax_id,
                email,
            } => {
                commands::clients::add_organization(&legal_name, tax_id.as_deref(), &email)
                    .await?;
            }
            ClientsAction::Remove { person_id } => commands::clients::remove(&person_id).await?,
        },
    }
    Ok(())
}
