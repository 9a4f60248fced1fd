use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLogoutArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle(args: &AuthLogoutArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let had_session = ctx.auth.active_session().is_some();

    if args.all {
        ctx.auth.forget_all()?;
    } else {
        caws_auth::logout(ctx.auth.as_ref()).await?;
    }

    output(
        &AuthLogoutResponse {
            cleared: had_session || args.all,
        },
        flags.format,
    )
}
