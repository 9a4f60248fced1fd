//! # caws-config
//!
//! Layered configuration loading for the CAWS toolkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CAWS_*` prefix, `__` as separator)
//! 2. Project-level `.caws/config.toml`
//! 3. User-level `~/.config/caws/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CAWS_CAWS__ENDPOINT` -> `caws.endpoint`,
//! `CAWS_AUTH__AUTO_CONNECT` -> `auth.auto_connect`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use caws_config::CawsConfig;
//!
//! let config = CawsConfig::load().expect("config");
//! println!("endpoint: {}", config.caws.endpoint());
//! ```

mod auth;
mod error;
mod service;

pub use auth::{AuthConfig, DEFAULT_KEYRING_SERVICE};
pub use error::ConfigError;
pub use service::{DEFAULT_ENDPOINT, DEFAULT_REGION, ServiceConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CawsConfig {
    #[serde(default)]
    pub caws: ServiceConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl CawsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; the binary loads them first.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".caws/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CAWS_").split("__"))
    }

    /// Reject values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.caws.endpoint();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "caws.endpoint".into(),
                reason: format!("expected an http(s) URL, got '{endpoint}'"),
            });
        }
        if self.caws.git_host.trim().is_empty() || self.caws.git_host.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "caws.git_host".into(),
                reason: "expected a bare host name".into(),
            });
        }
        if self.auth.keyring_service.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.keyring_service".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("caws").join("config.toml"))
    }
}
