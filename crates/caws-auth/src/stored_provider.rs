use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use caws_core::{AccessDetails, Account, AccountDetails, Session};
use chrono::Utc;

use crate::error::AuthError;
use crate::provider::AuthProvider;
use crate::session_store::{SessionStore, StoredAccount, StoredState};

/// [`AuthProvider`] backed by a [`SessionStore`].
///
/// State is cached in-process and written through on every change.
#[derive(Debug)]
pub struct StoredAuthProvider {
    store: SessionStore,
    state: RwLock<StoredState>,
}

impl StoredAuthProvider {
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the existing state cannot be loaded.
    pub fn open(store: SessionStore) -> Result<Self, AuthError> {
        let state = store.load()?;
        Ok(Self {
            store,
            state: RwLock::new(state),
        })
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn active_session(&self) -> Option<Session> {
        self.read(|state| state.sessions.first().cloned())
    }

    /// Create a session for `account` and make it the active one.
    ///
    /// Any previously active session is discarded. The account is remembered
    /// for later auto-connect.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the id cannot be generated or the
    /// state cannot be persisted.
    pub fn register_session(
        &self,
        account: AccountDetails,
        access: AccessDetails,
    ) -> Result<Session, AuthError> {
        let session = new_session(account, access)?;
        self.activate(session.clone())?;
        Ok(session)
    }

    /// Drop every session and account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the store cannot be cleared.
    pub fn forget_all(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = StoredState::default();
        Ok(())
    }

    fn activate(&self, session: Session) -> Result<(), AuthError> {
        let remembered = StoredAccount {
            account: Account::from(&session.account),
            access: session.access.clone(),
        };
        let (id, label) = (session.id.clone(), session.label().to_string());

        let replaced = self.update(move |state| {
            let replaced = std::mem::replace(&mut state.sessions, vec![session]);
            state
                .accounts
                .retain(|stored| stored.account.id != remembered.account.id);
            state.accounts.insert(0, remembered);
            replaced.len()
        })?;

        tracing::debug!(session = %id, account = %label, replaced, "session activated");
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&StoredState) -> R) -> R {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn update<R>(&self, f: impl FnOnce(&mut StoredState) -> R) -> Result<R, AuthError> {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        let out = f(&mut next);
        self.store.save(&next)?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl AuthProvider for StoredAuthProvider {
    fn list_sessions(&self) -> Vec<Session> {
        self.read(|state| state.sessions.clone())
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.read(|state| {
            state
                .accounts
                .iter()
                .map(|stored| stored.account.clone())
                .collect()
        })
    }

    async fn create_session(&self, account: &Account) -> Result<Session, AuthError> {
        let stored = self
            .read(|state| {
                state
                    .accounts
                    .iter()
                    .find(|stored| stored.account.id == account.id)
                    .cloned()
            })
            .ok_or_else(|| AuthError::NoStoredCredentials {
                account: account.label.clone(),
            })?;

        if stored.access.is_expired(Utc::now()) {
            return Err(AuthError::CredentialsExpired {
                account: account.label.clone(),
            });
        }

        self.register_session(
            AccountDetails {
                id: stored.account.id,
                label: stored.account.label,
            },
            stored.access,
        )
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        self.activate(session.clone())
    }

    async fn delete_session(&self, session: &Session) -> Result<(), AuthError> {
        let removed = self.update(|state| {
            let before = state.sessions.len();
            state.sessions.retain(|s| !s.is_same(session));
            before != state.sessions.len()
        })?;
        if removed {
            tracing::debug!(session = %session.id, "session deleted");
        }
        Ok(())
    }
}

/// A fresh, not yet persisted session with a random id.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if no randomness is available.
pub fn new_session(account: AccountDetails, access: AccessDetails) -> Result<Session, AuthError> {
    Ok(Session {
        id: new_session_id()?,
        account,
        access,
        created_at: Utc::now(),
    })
}

fn new_session_id() -> Result<String, AuthError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::SessionStore(format!("failed to generate session id: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
