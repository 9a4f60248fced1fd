//! In-memory collaborators for dispatcher and login tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use caws_auth::{
    AuthError, AuthProvider, ClientFactory, LoginFlow, LoginResponse, Notifier, ServiceClient,
};
use caws_core::{AccessDetails, Account, AccountDetails, Session};
use chrono::Utc;
use mockall::mock;

pub fn session(id: &str, account: &str) -> Session {
    Session {
        id: id.to_string(),
        account: AccountDetails {
            id: account.to_string(),
            label: account.to_string(),
        },
        access: AccessDetails::new(format!("token-for-{id}")),
        created_at: Utc::now(),
    }
}

pub fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        label: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Auth provider
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeAuthProvider {
    sessions: Mutex<Vec<Session>>,
    accounts: Vec<Account>,
    failing: HashSet<String>,
    attempts: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    stored: Mutex<Vec<String>>,
    fail_delete: bool,
    fail_store: bool,
}

impl FakeAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// `sessions` most recent first.
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            ..Self::default()
        }
    }

    /// `(account id, create_session succeeds)` in provider order.
    pub fn with_accounts(accounts: &[(&str, bool)]) -> Self {
        Self {
            accounts: accounts.iter().map(|(id, _)| account(id)).collect(),
            failing: accounts
                .iter()
                .filter(|(_, ok)| !ok)
                .map(|(id, _)| (*id).to_string())
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_stores(mut self) -> Self {
        self.fail_store = true;
        self
    }

    pub fn push_session(&self, session: Session) {
        self.sessions.lock().unwrap().insert(0, session);
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.list_sessions().into_iter().map(|s| s.id).collect()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    fn list_sessions(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    async fn create_session(&self, account: &Account) -> Result<Session, AuthError> {
        self.attempts.lock().unwrap().push(account.id.clone());
        if self.failing.contains(&account.id) {
            return Err(AuthError::CredentialsExpired {
                account: account.label.clone(),
            });
        }
        let created = session(&format!("auto-{}", account.id), &account.id);
        self.push_session(created.clone());
        Ok(created)
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        if self.fail_store {
            return Err(AuthError::SessionStore("read-only store".into()));
        }
        self.stored.lock().unwrap().push(session.id.clone());
        self.sessions.lock().unwrap().retain(|s| s.id != session.id);
        self.push_session(session.clone());
        Ok(())
    }

    async fn delete_session(&self, session: &Session) -> Result<(), AuthError> {
        if self.fail_delete {
            return Err(AuthError::SessionStore("disk full".into()));
        }
        self.deleted.lock().unwrap().push(session.id.clone());
        self.sessions.lock().unwrap().retain(|s| s.id != session.id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Client + factory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum Binding {
    Accept,
    Reject,
    /// Reports success but never flips `connected`.
    AcceptButStayDisconnected,
}

#[derive(Default)]
pub struct ClientTally {
    pub created: AtomicUsize,
    pub set_credentials_calls: AtomicUsize,
    pub bound_accounts: Mutex<Vec<String>>,
}

impl ClientTally {
    pub fn set_credentials_calls(&self) -> usize {
        self.set_credentials_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct FakeClient {
    pub id: usize,
    connected: AtomicBool,
    binding: Binding,
    tally: Arc<ClientTally>,
}

impl std::fmt::Debug for ClientTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientTally").finish_non_exhaustive()
    }
}

#[async_trait]
impl ServiceClient for FakeClient {
    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn set_credentials(
        &self,
        _access: &AccessDetails,
        account_id: &str,
    ) -> Result<(), AuthError> {
        self.tally.set_credentials_calls.fetch_add(1, Ordering::SeqCst);
        match self.binding {
            Binding::Accept => {
                self.tally
                    .bound_accounts
                    .lock()
                    .unwrap()
                    .push(account_id.to_string());
                self.connected.store(true, Ordering::SeqCst);
                Ok(())
            }
            Binding::Reject => Err(AuthError::CredentialsRejected("HTTP 401".into())),
            Binding::AcceptButStayDisconnected => Ok(()),
        }
    }
}

pub struct FakeClientFactory {
    pub tally: Arc<ClientTally>,
    initially_connected: bool,
    binding: Binding,
    fail: bool,
}

impl FakeClientFactory {
    pub fn connected() -> Self {
        Self::new(true, Binding::Accept)
    }

    pub fn disconnected(binding: Binding) -> Self {
        Self::new(false, binding)
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(false, Binding::Accept)
        }
    }

    fn new(initially_connected: bool, binding: Binding) -> Self {
        Self {
            tally: Arc::new(ClientTally::default()),
            initially_connected,
            binding,
            fail: false,
        }
    }
}

#[async_trait]
impl ClientFactory for FakeClientFactory {
    type Client = FakeClient;

    async fn create(&self) -> Result<FakeClient, AuthError> {
        if self.fail {
            return Err(AuthError::ClientSetup("config unreadable".into()));
        }
        let id = self.tally.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeClient {
            id,
            connected: AtomicBool::new(self.initially_connected),
            binding: self.binding,
            tally: Arc::clone(&self.tally),
        })
    }
}

// ---------------------------------------------------------------------------
// Login flow
// ---------------------------------------------------------------------------

/// Hands out a new, unsaved session on every run, or declines.
pub struct FakeLoginFlow {
    response: Option<(String, String)>,
    runs: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FakeLoginFlow {
    /// The first run yields session `session_id`; later runs `session_id-N`.
    pub fn responding(session_id: &str, account: &str) -> Self {
        Self {
            response: Some((session_id.to_string(), account.to_string())),
            runs: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn declining() -> Self {
        Self {
            response: None,
            runs: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// Highest number of runs that were in progress at the same time.
    pub fn max_concurrent_runs(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginFlow for FakeLoginFlow {
    async fn run(&self) -> Option<LoginResponse> {
        let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        // Give other tasks a chance to enter the flow concurrently.
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        let (session_id, account) = self.response.as_ref()?;
        let id = if run == 1 {
            session_id.clone()
        } else {
            format!("{session_id}-{run}")
        };
        Some(LoginResponse {
            session: session(&id, account),
        })
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

mock! {
    pub Sink {}

    impl Notifier for Sink {
        fn show_error_message(&self, text: &str);
    }
}
