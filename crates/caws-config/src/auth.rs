//! Session and login settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_KEYRING_SERVICE: &str = "caws-cli";

const fn default_auto_connect() -> bool {
    true
}

fn default_keyring_service() -> String {
    DEFAULT_KEYRING_SERVICE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Try stored accounts before prompting when no session is active.
    #[serde(default = "default_auto_connect")]
    pub auto_connect: bool,

    /// OS keychain service name sessions are stored under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// When set, sessions live only in this file and the keychain is skipped.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,

    /// Lifetime given to tokens entered at the login prompt.
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auto_connect: default_auto_connect(),
            keyring_service: default_keyring_service(),
            credentials_file: None,
            token_ttl_secs: None,
        }
    }
}
