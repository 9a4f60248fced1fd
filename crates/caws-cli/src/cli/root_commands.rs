use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, DynamodbCommands, RepoCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Show the connected CodeCatalyst account.
    Whoami,
    /// Source repositories.
    Repo {
        #[command(subcommand)]
        action: RepoCommands,
    },
    /// DynamoDB explorer.
    Dynamodb {
        #[command(subcommand)]
        action: DynamodbCommands,
    },
}
