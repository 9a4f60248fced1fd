use clap::{Args, Subcommand};

/// Repository commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RepoCommands {
    /// Print the git clone URI for a CodeCatalyst repository URL.
    CloneUri(RepoCloneUriArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RepoCloneUriArgs {
    /// Repository link: `https://host/clone/org/project/repo` or `clone/org/project/repo`.
    pub url: String,
}
