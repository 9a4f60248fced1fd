use std::sync::Arc;

use anyhow::Context;
use caws_auth::prompt_flow::PromptLoginFlow;
use caws_auth::remote_client::{RemoteClient, RemoteClientFactory};
use caws_auth::session_store::SessionStore;
use caws_auth::stored_provider::StoredAuthProvider;
use caws_auth::{AuthProvider, CommandDecorator, LoginFlow, Notifier};
use caws_config::{AuthConfig, CawsConfig};

use crate::ui::StderrNotifier;

/// Shared handles for command handlers.
pub struct AppContext {
    pub config: CawsConfig,
    pub auth: Arc<StoredAuthProvider>,
    pub flow: Arc<PromptLoginFlow>,
    pub decorator: CommandDecorator<RemoteClientFactory>,
}

impl AppContext {
    pub fn init(config: CawsConfig) -> anyhow::Result<Self> {
        let store = match &config.auth.credentials_file {
            Some(path) => SessionStore::file(path.clone()),
            None => SessionStore::system(&config.auth.keyring_service)
                .context("failed to open the session keychain")?,
        };
        let auth = Arc::new(StoredAuthProvider::open(store).context("failed to load stored sessions")?);
        let flow = Arc::new(PromptLoginFlow::stdin(token_ttl(&config.auth)));

        let provider: Arc<dyn AuthProvider> = auth.clone();
        let login_flow: Arc<dyn LoginFlow> = flow.clone();
        let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);
        let factory = RemoteClientFactory::new(
            Arc::clone(&provider),
            config.caws.endpoint(),
            config.auth.auto_connect,
        );
        let decorator = CommandDecorator::new(provider, factory, login_flow, notifier);

        Ok(Self {
            config,
            auth,
            flow,
            decorator,
        })
    }

    /// A client with no session bound, for explicit logins.
    pub fn unbound_client(&self) -> anyhow::Result<RemoteClient> {
        RemoteClient::new(self.config.caws.endpoint()).map_err(anyhow::Error::from)
    }
}

/// Prompt token lifetime; values past the representable range mean no expiry.
fn token_ttl(config: &AuthConfig) -> Option<chrono::Duration> {
    config
        .token_ttl_secs
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(chrono::Duration::try_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_ttl_converts_seconds() {
        let config = AuthConfig {
            token_ttl_secs: Some(3600),
            ..AuthConfig::default()
        };
        assert_eq!(token_ttl(&config), Some(chrono::Duration::hours(1)));
    }

    #[test]
    fn token_ttl_absent_or_overflowing_is_none() {
        assert_eq!(token_ttl(&AuthConfig::default()), None);
        let config = AuthConfig {
            token_ttl_secs: Some(u64::MAX),
            ..AuthConfig::default()
        };
        assert_eq!(token_ttl(&config), None);
    }

    #[test]
    fn init_with_credentials_file_skips_keychain() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let mut config = CawsConfig::default();
        config.auth.credentials_file = Some(tmp.path().join("sessions.json"));

        let ctx = AppContext::init(config).expect("context");
        assert!(ctx.auth.active_session().is_none());
        assert_eq!(ctx.auth.store().source(), None);
    }
}
