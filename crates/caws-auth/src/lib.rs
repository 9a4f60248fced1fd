//! # caws-auth
//!
//! Authentication for the CAWS toolkit.
//!
//! Provides the login, auto-connect, and logout sequences, the
//! connect-or-login-then-run dispatcher for resource-scoped commands, a
//! persisted session store (OS keychain with file fallback), a CodeCatalyst
//! client that verifies bearer tokens, and a terminal login prompt.

pub mod error;
pub mod login;
pub mod prompt_flow;
pub mod provider;
pub mod remote_client;
pub mod runner;
pub mod session_store;
pub mod stored_provider;

pub use error::AuthError;
pub use login::{auto_connect, login, logout};
pub use provider::{AuthProvider, ClientFactory, LoginFlow, LoginResponse, Notifier, ServiceClient};
pub use runner::{AuthenticatedRunner, CommandDecorator, Connected, NOT_CONNECTED_MESSAGE, Runner};
