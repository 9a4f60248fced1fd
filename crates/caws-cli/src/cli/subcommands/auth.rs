use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with an account id and access token.
    Login,
    /// Delete the active session.
    Logout(AuthLogoutArgs),
    /// Show the active session.
    Status,
    /// Try stored accounts until one yields a session.
    AutoConnect,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLogoutArgs {
    /// Forget every stored session and account.
    #[arg(long)]
    pub all: bool,
}
