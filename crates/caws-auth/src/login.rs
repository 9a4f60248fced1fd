//! Login, auto-connect, and logout sequences.
//!
//! Only one session is kept active: a successful login removes the session
//! that was active before it started.

use caws_core::LoginResult;

use crate::error::AuthError;
use crate::provider::{AuthProvider, LoginFlow, ServiceClient};

/// Run the interactive login flow and bind its credentials to `client`.
///
/// The previously active session is captured before the flow starts. The new
/// session is stored, and the previous one deleted, only after the client
/// accepted the new credentials. A failed login leaves the stored state as it
/// was.
pub async fn login<C>(auth: &dyn AuthProvider, flow: &dyn LoginFlow, client: &C) -> LoginResult
where
    C: ServiceClient + ?Sized,
{
    let last_session = auth.list_sessions().into_iter().next();

    let Some(response) = flow.run().await else {
        tracing::debug!("caws: login cancelled");
        return LoginResult::Cancelled;
    };
    let session = response.session;

    if let Err(error) = client
        .set_credentials(&session.access, &session.account.id)
        .await
    {
        tracing::error!(%error, account = %session.label(), "caws: failed to login");
        return LoginResult::Failed;
    }

    if let Err(error) = auth.store_session(&session).await {
        tracing::error!(%error, account = %session.label(), "caws: failed to store session");
        return LoginResult::Failed;
    }

    if let Some(last) = last_session.filter(|last| !last.is_same(&session)) {
        if let Err(error) = auth.delete_session(&last).await {
            tracing::warn!(%error, session = %last.id, "caws: failed to remove previous session");
        }
    }

    tracing::info!(account = %session.label(), "caws: logged in");
    LoginResult::Succeeded
}

/// Try each known account in provider order until one connects.
///
/// Returns `true` on the first success; later accounts are not tried.
pub async fn auto_connect(auth: &dyn AuthProvider) -> bool {
    for account in auth.list_accounts() {
        tracing::info!(user = %account.label, "caws: trying to auto-connect");

        match auth.create_session(&account).await {
            Ok(_) => {
                tracing::info!(user = %account.label, "caws: auto-connected");
                return true;
            }
            Err(error) => {
                tracing::debug!(%error, user = %account.label, "caws: unable to auto-connect");
            }
        }
    }

    false
}

/// Delete the active session, if any.
///
/// # Errors
///
/// Returns the provider's error if the session cannot be removed.
pub async fn logout(auth: &dyn AuthProvider) -> Result<(), AuthError> {
    match auth.list_sessions().into_iter().next() {
        Some(session) => auth.delete_session(&session).await,
        None => Ok(()),
    }
}
