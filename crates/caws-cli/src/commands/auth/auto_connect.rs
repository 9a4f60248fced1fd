use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AutoConnectResponse {
    connected: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let connected = caws_auth::auto_connect(ctx.auth.as_ref()).await;
    output(&AutoConnectResponse { connected }, flags.format)
}
