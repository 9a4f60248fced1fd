//! CodeCatalyst client that verifies bearer tokens against the service.
//!
//! Calls the `userDetails` endpoint directly via `reqwest`; a token the
//! service accepts there is considered bound.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use caws_core::AccessDetails;
use chrono::Utc;

use crate::error::AuthError;
use crate::login::auto_connect;
use crate::provider::{AuthProvider, ClientFactory, ServiceClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct Bound {
    account_id: String,
    access: AccessDetails,
}

#[derive(Debug)]
pub struct RemoteClient {
    http: reqwest::Client,
    endpoint: String,
    bound: RwLock<Option<Bound>>,
}

impl RemoteClient {
    /// # Errors
    ///
    /// Returns `AuthError::ClientSetup` if the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("caws-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthError::ClientSetup(format!("build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bound: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Account the client is bound to, if connected.
    #[must_use]
    pub fn account_id(&self) -> Option<String> {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|bound| bound.account_id.clone())
    }

    /// Expiry of the bound token, if connected and known.
    #[must_use]
    pub fn expires_at(&self) -> Option<chrono::DateTime<Utc>> {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|bound| bound.access.expires_at)
    }
}

#[async_trait]
impl ServiceClient for RemoteClient {
    fn connected(&self) -> bool {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    async fn set_credentials(
        &self,
        access: &AccessDetails,
        account_id: &str,
    ) -> Result<(), AuthError> {
        if access.is_expired(Utc::now()) {
            return Err(AuthError::CredentialsRejected(format!(
                "access token for '{account_id}' has expired"
            )));
        }

        let url = format!("{}/v1/userDetails", self.endpoint);
        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", access.secret))
            .send()
            .await
            .map_err(|e| AuthError::CredentialsRejected(format!("verify credentials: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::CredentialsRejected(format!(
                "verify credentials: HTTP {status}: {body}"
            )));
        }

        *self.bound.write().unwrap_or_else(PoisonError::into_inner) = Some(Bound {
            account_id: account_id.to_string(),
            access: access.clone(),
        });
        tracing::debug!(account = account_id, "credentials bound");
        Ok(())
    }
}

/// Builds a [`RemoteClient`] per invocation and binds the active session to it.
pub struct RemoteClientFactory {
    auth: Arc<dyn AuthProvider>,
    endpoint: String,
    auto_connect: bool,
}

impl RemoteClientFactory {
    pub fn new(auth: Arc<dyn AuthProvider>, endpoint: impl Into<String>, auto_connect: bool) -> Self {
        Self {
            auth,
            endpoint: endpoint.into(),
            auto_connect,
        }
    }
}

#[async_trait]
impl ClientFactory for RemoteClientFactory {
    type Client = RemoteClient;

    async fn create(&self) -> Result<RemoteClient, AuthError> {
        let client = RemoteClient::new(&self.endpoint)?;

        if self.auth.list_sessions().is_empty() {
            if !self.auto_connect || !auto_connect(self.auth.as_ref()).await {
                return Ok(client);
            }
        }

        if let Some(session) = self.auth.list_sessions().into_iter().next() {
            if let Err(error) = client
                .set_credentials(&session.access, &session.account.id)
                .await
            {
                tracing::debug!(%error, account = %session.label(), "active session could not be bound");
            }
        }

        Ok(client)
    }
}
