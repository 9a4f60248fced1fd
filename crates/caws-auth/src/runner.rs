//! Authenticated command dispatch.
//!
//! A resource-scoped command takes a [`Connected`] client as its first input.
//! [`CommandDecorator::decorate`] wraps such a command in an
//! [`AuthenticatedRunner`] that obtains a client, logs in when the client is
//! not connected, and only then runs the command.
//!
//! Authentication-phase outcomes never surface as errors: a cancelled login,
//! a rejected login, or a client that still reports disconnected after a
//! successful login all yield `Ok(None)`. A rejected login additionally shows
//! [`NOT_CONNECTED_MESSAGE`]. Errors returned by the command itself are passed
//! through untouched.

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use caws_core::LoginResult;
use tokio::sync::Mutex;

use crate::error::AuthError;
use crate::login::login;
use crate::provider::{AuthProvider, ClientFactory, LoginFlow, Notifier, ServiceClient};

/// Shown once when the client rejects the credentials of a login.
pub const NOT_CONNECTED_MESSAGE: &str = "AWS: Not connected to CodeCatalyst";

/// A client whose `connected` flag was true when it was handed out.
#[derive(Debug)]
pub struct Connected<C>(C);

impl<C: ServiceClient> Connected<C> {
    /// Wrap `client` if it is connected, hand it back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the client unchanged when `connected()` is false.
    pub fn new(client: C) -> Result<Self, C> {
        if client.connected() {
            Ok(Self(client))
        } else {
            Err(client)
        }
    }
}

impl<C> Deref for Connected<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.0
    }
}

/// A command that can be invoked with arguments `A`, producing `T` when it ran.
#[async_trait]
pub trait Runner<A: Send + 'static, T: Send + 'static>: Send + Sync {
    type Error: Send;

    /// `Ok(None)` means the command did not run.
    async fn run(&self, args: A) -> Result<Option<T>, Self::Error>;
}

struct DispatchDeps<F> {
    auth: Arc<dyn AuthProvider>,
    factory: F,
    flow: Arc<dyn LoginFlow>,
    notifier: Arc<dyn Notifier>,
    // Serialises login sequences so that capturing and deleting the previous
    // session cannot interleave with another login.
    login_gate: Mutex<()>,
}

/// Wraps resource-scoped commands so they log in on demand.
///
/// Holds no client between invocations.
pub struct CommandDecorator<F> {
    deps: Arc<DispatchDeps<F>>,
}

impl<F> Clone for CommandDecorator<F> {
    fn clone(&self) -> Self {
        Self {
            deps: Arc::clone(&self.deps),
        }
    }
}

impl<F: ClientFactory> CommandDecorator<F> {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        factory: F,
        flow: Arc<dyn LoginFlow>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            deps: Arc::new(DispatchDeps {
                auth,
                factory,
                flow,
                notifier,
                login_gate: Mutex::new(()),
            }),
        }
    }

    /// Wrap `command`. Runners created by one decorator share its login gate.
    pub fn decorate<Cmd>(&self, command: Cmd) -> AuthenticatedRunner<F, Cmd> {
        AuthenticatedRunner {
            deps: Arc::clone(&self.deps),
            command,
        }
    }
}

/// A command wrapped by [`CommandDecorator::decorate`].
pub struct AuthenticatedRunner<F, Cmd> {
    deps: Arc<DispatchDeps<F>>,
    command: Cmd,
}

impl<F: ClientFactory, Cmd> AuthenticatedRunner<F, Cmd> {
    async fn login_serialised(&self, client: &F::Client) -> LoginResult {
        let _gate = self.deps.login_gate.lock().await;
        login(self.deps.auth.as_ref(), self.deps.flow.as_ref(), client).await
    }
}

#[async_trait]
impl<F, Cmd, Fut, A, T, E> Runner<A, T> for AuthenticatedRunner<F, Cmd>
where
    F: ClientFactory + 'static,
    F::Client: 'static,
    Cmd: Fn(Connected<F::Client>, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
    E: From<AuthError> + Send + 'static,
{
    type Error = E;

    async fn run(&self, args: A) -> Result<Option<T>, E> {
        let client = self.deps.factory.create().await?;

        let client = match Connected::new(client) {
            Ok(connected) => return (self.command)(connected, args).await.map(Some),
            Err(client) => client,
        };

        match self.login_serialised(&client).await {
            LoginResult::Succeeded => match Connected::new(client) {
                Ok(connected) => (self.command)(connected, args).await.map(Some),
                Err(_) => {
                    tracing::debug!("caws: login succeeded but client is still disconnected");
                    Ok(None)
                }
            },
            LoginResult::Cancelled => Ok(None),
            LoginResult::Failed => {
                self.deps.notifier.show_error_message(NOT_CONNECTED_MESSAGE);
                Ok(None)
            }
        }
    }
}
