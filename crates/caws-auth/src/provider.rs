//! Collaborator contracts consumed by the login sequences and the dispatcher.
//!
//! Every collaborator is passed in explicitly; nothing here has a global
//! default. Tests supply in-memory fakes, `caws-cli` supplies the stored
//! provider, the remote client, and the terminal prompt.

use async_trait::async_trait;
use caws_core::{AccessDetails, Account, Session};

use crate::error::AuthError;

/// Lists, creates, and deletes sessions.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Known sessions, most recent first.
    fn list_sessions(&self) -> Vec<Session>;

    /// Accounts eligible for non-interactive re-authentication, in provider order.
    fn list_accounts(&self) -> Vec<Account>;

    /// Create a session for `account` without prompting.
    ///
    /// # Errors
    ///
    /// Fails when the stored credentials are missing, expired, or rejected.
    async fn create_session(&self, account: &Account) -> Result<Session, AuthError>;

    /// Persist a session whose credentials the client accepted. It becomes the
    /// active session.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be updated.
    async fn store_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Remove `session`. Unknown sessions are a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be updated.
    async fn delete_session(&self, session: &Session) -> Result<(), AuthError>;
}

/// Handle to the remote service.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    fn connected(&self) -> bool;

    /// Bind `access` to the client for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CredentialsRejected` if the service refuses them.
    async fn set_credentials(&self, access: &AccessDetails, account_id: &str)
    -> Result<(), AuthError>;
}

/// Produces a fresh client per invocation. May perform I/O before returning.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: ServiceClient;

    async fn create(&self) -> Result<Self::Client, AuthError>;
}

/// Answer of a completed interactive login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// The chosen account and access details. Not yet persisted.
    pub session: Session,
}

/// Interactive credential selection. `None` means the user declined.
///
/// A flow never persists what it returns; [`login`](crate::login::login) stores the session
/// once the client has accepted it.
#[async_trait]
pub trait LoginFlow: Send + Sync {
    async fn run(&self) -> Option<LoginResponse>;
}

/// User-facing error sink. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn show_error_message(&self, text: &str);
}
