//! Outcome enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an interactive login sequence.
///
/// Produced once per login and consumed by the caller; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginResult {
    /// Credentials were bound to the client.
    Succeeded,
    /// The user declined the interactive flow.
    Cancelled,
    /// The client rejected the supplied credentials.
    Failed,
}

impl LoginResult {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LoginResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
