use caws_core::LoginResult;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    result: LoginResult,
    account: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.unbound_client()?;
    let result = caws_auth::login(ctx.auth.as_ref(), ctx.flow.as_ref(), &client).await;

    let account = (result == LoginResult::Succeeded)
        .then(|| ctx.auth.active_session())
        .flatten()
        .map(|session| session.label().to_string());
    output(&AuthLoginResponse { result, account }, flags.format)?;

    if result == LoginResult::Failed {
        anyhow::bail!("auth login: credentials were rejected by {}", ctx.config.caws.endpoint());
    }
    Ok(())
}
