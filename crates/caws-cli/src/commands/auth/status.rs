use caws_core::Session;
use chrono::Utc;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AuthStatusResponse {
    authenticated: bool,
    account_id: Option<String>,
    label: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = describe(ctx.auth.active_session(), ctx.auth.store().source());
    output(&status, flags.format)
}

fn describe(session: Option<Session>, token_source: Option<&'static str>) -> AuthStatusResponse {
    let Some(session) = session else {
        return AuthStatusResponse {
            authenticated: false,
            account_id: None,
            label: None,
            expires_at: None,
            token_source,
            note: Some("no active session; run `caws auth login`".into()),
        };
    };

    let expired = session.access.is_expired(Utc::now());
    AuthStatusResponse {
        authenticated: !expired,
        account_id: Some(session.account.id.clone()),
        label: Some(session.label().to_string()),
        expires_at: session.access.expires_at.map(|at| at.to_rfc3339()),
        token_source,
        note: expired.then(|| "access token expired".to_string()),
    }
}
