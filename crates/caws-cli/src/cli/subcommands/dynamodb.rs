use clap::{Args, Subcommand};

/// DynamoDB explorer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DynamodbCommands {
    /// Resolve the search context for a table or service node.
    Search(DynamodbSearchArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DynamodbSearchArgs {
    /// Region of the selected node.
    #[arg(long)]
    pub region: Option<String>,
    /// Table group (requires --region).
    #[arg(long)]
    pub group: Option<String>,
}
