//! CodeCatalyst service endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://codecatalyst.global.api.aws";
pub const DEFAULT_REGION: &str = "us-west-2";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_git_host() -> String {
    format!("git.{DEFAULT_REGION}.codecatalyst.aws")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the CodeCatalyst API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Host serving git clone URLs.
    #[serde(default = "default_git_host")]
    pub git_host: String,

    /// Region used when a command does not name one.
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            git_host: default_git_host(),
            region: default_region(),
        }
    }
}

impl ServiceConfig {
    /// Endpoint without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}
