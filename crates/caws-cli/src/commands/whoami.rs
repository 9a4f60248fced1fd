use std::sync::Arc;

use caws_auth::remote_client::RemoteClient;
use caws_auth::{AuthProvider, Connected, Runner};
use caws_core::Account;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse {
    account_id: Option<String>,
    label: Option<String>,
    endpoint: String,
    region: String,
    expires_at: Option<String>,
}

/// Resource-scoped: logs in first when no session is bound.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let auth = Arc::clone(&ctx.auth);
    let region = ctx.config.caws.region.clone();
    let runner = ctx
        .decorator
        .decorate(move |client: Connected<RemoteClient>, (): ()| {
            let account_id = client.account_id();
            let label = bound_label(account_id.as_deref(), &auth.list_accounts());
            let region = region.clone();
            async move {
                Ok::<_, anyhow::Error>(WhoamiResponse {
                    account_id,
                    label,
                    endpoint: client.endpoint().to_string(),
                    region,
                    expires_at: client.expires_at().map(|at| at.to_rfc3339()),
                })
            }
        });

    match runner.run(()).await? {
        Some(response) => output(&response, flags.format),
        None => Ok(()),
    }
}

/// Label of the account the client is bound to, if it is a known one.
fn bound_label(account_id: Option<&str>, accounts: &[Account]) -> Option<String> {
    let account_id = account_id?;
    accounts
        .iter()
        .find(|account| account.id == account_id)
        .map(|account| account.label.clone())
}
