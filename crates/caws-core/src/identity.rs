use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity carried by a completed login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Account identifier passed to the client when binding credentials.
    pub id: String,
    /// Human-readable name shown in prompts and logs.
    pub label: String,
}

/// Access token bound to an account.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDetails {
    pub secret: String,
    /// `None` = no known expiry.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessDetails {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: None,
        }
    }

    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the token has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl fmt::Debug for AccessDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessDetails")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// An authenticated credential set bound to one account.
///
/// Two sessions are the same session iff their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub account: AccountDetails,
    pub access: AccessDetails,
    pub created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.account.label
    }

    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A previously used identity that can be re-authenticated without prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub label: String,
}

impl From<&AccountDetails> for Account {
    fn from(details: &AccountDetails) -> Self {
        Self {
            id: details.id.clone(),
            label: details.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn debug_redacts_secret() {
        let access = AccessDetails::new("super-secret-token");
        let rendered = format!("{access:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn expiry_is_inclusive() {
        let now = Utc::now();
        let access = AccessDetails::new("t").with_expiry(now);
        assert!(access.is_expired(now));
        assert!(!access.is_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn no_expiry_never_expires() {
        let access = AccessDetails::new("t");
        assert!(!access.is_expired(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn sessions_compare_by_id() {
        let account = AccountDetails {
            id: "acct-1".into(),
            label: "alice".into(),
        };
        let a = Session {
            id: "s-1".into(),
            account: account.clone(),
            access: AccessDetails::new("a"),
            created_at: Utc::now(),
        };
        let b = Session {
            access: AccessDetails::new("b"),
            ..a.clone()
        };
        let c = Session {
            id: "s-2".into(),
            ..a.clone()
        };
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
        assert_eq!(a.label(), "alice");
    }
}
