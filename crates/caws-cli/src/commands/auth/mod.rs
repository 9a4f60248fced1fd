mod auto_connect;
mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `caws auth <subcommand>`.
pub async fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login => login::handle(ctx, flags).await,
        AuthCommands::Logout(args) => logout::handle(args, ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags),
        AuthCommands::AutoConnect => auto_connect::handle(ctx, flags).await,
    }
}
