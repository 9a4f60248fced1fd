//! Persistence for sessions and re-authenticable accounts.
//!
//! The system store keeps the serialized state in the OS keychain and falls
//! back to `~/.caws/sessions.json` when the keychain is unavailable. Every
//! write is stamped, and loading picks whichever copy was written last, so a
//! fallback write is never shadowed by an older keychain entry. The file
//! store never touches the keychain.

use std::fs;
use std::path::{Path, PathBuf};

use caws_core::{AccessDetails, Account, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const KEYRING_USER: &str = "sessions";
const STATE_FILE_NAME: &str = "sessions.json";

/// An account together with the access details that re-authenticate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub account: Account,
    pub access: AccessDetails,
}

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    /// The active session, if any. Never holds more than one.
    #[serde(default)]
    pub sessions: Vec<Session>,
    /// Most recently used first.
    #[serde(default)]
    pub accounts: Vec<StoredAccount>,
}

/// On-disk and keychain envelope.
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    /// Absent in state written before stamping existed; sorts oldest.
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    state: StoredState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Keyring,
    File,
}

impl Tier {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    System { service: String, fallback: PathBuf },
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    backend: Backend,
}

impl SessionStore {
    /// Keychain-backed store with a file fallback under the home directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the home directory cannot be found.
    pub fn system(service: &str) -> Result<Self, AuthError> {
        Ok(Self {
            backend: Backend::System {
                service: service.to_string(),
                fallback: default_state_path()?,
            },
        })
    }

    /// File-only store at `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(path.into()),
        }
    }

    /// Load the persisted state. A store that was never written loads empty.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if stored data cannot be read or parsed.
    pub fn load(&self) -> Result<StoredState, AuthError> {
        Ok(self
            .load_newest()?
            .map(|(_, persisted)| persisted.state)
            .unwrap_or_default())
    }

    /// Persist `state`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if neither the keychain nor the file
    /// could be written.
    pub fn save(&self, state: &StoredState) -> Result<(), AuthError> {
        let persisted = Persisted {
            saved_at: Some(Utc::now()),
            state: state.clone(),
        };
        let json = serde_json::to_string(&persisted)
            .map_err(|e| AuthError::SessionStore(format!("serialize state: {e}")))?;

        match &self.backend {
            Backend::System { service, fallback } => {
                match keyring::Entry::new(service, KEYRING_USER) {
                    Ok(entry) => match entry.set_password(&json) {
                        Ok(()) => Ok(()),
                        Err(error) => {
                            tracing::warn!(%error, "keyring store failed; falling back to file");
                            store_file(fallback, &json)
                        }
                    },
                    Err(error) => {
                        tracing::warn!(%error, "keyring unavailable; falling back to file");
                        store_file(fallback, &json)
                    }
                }
            }
            Backend::File(path) => store_file(path, &json),
        }
    }

    /// Remove all persisted state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the state file cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        let path = match &self.backend {
            Backend::System { service, fallback } => {
                // May not exist.
                if let Ok(entry) = keyring::Entry::new(service, KEYRING_USER) {
                    let _ = entry.delete_credential();
                }
                fallback
            }
            Backend::File(path) => path,
        };

        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::SessionStore(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    /// Which tier currently holds the state (for status display).
    #[must_use]
    pub fn source(&self) -> Option<&'static str> {
        self.load_newest()
            .ok()
            .flatten()
            .map(|(tier, _)| tier.as_str())
    }

    fn load_newest(&self) -> Result<Option<(Tier, Persisted)>, AuthError> {
        match &self.backend {
            Backend::System { service, fallback } => {
                let keyring = load_keyring(service)
                    .map(|json| parse_persisted(&json))
                    .transpose()?;
                let file = load_file(fallback)?;
                Ok(newest(keyring, file))
            }
            Backend::File(path) => Ok(load_file(path)?.map(|p| (Tier::File, p))),
        }
    }
}

/// Prefer the later write; a tie goes to the keychain.
fn newest(keyring: Option<Persisted>, file: Option<Persisted>) -> Option<(Tier, Persisted)> {
    match (keyring, file) {
        (Some(keyring), Some(file)) if file.saved_at > keyring.saved_at => {
            tracing::debug!("session file is newer than the keychain entry");
            Some((Tier::File, file))
        }
        (Some(keyring), _) => Some((Tier::Keyring, keyring)),
        (None, file) => file.map(|file| (Tier::File, file)),
    }
}

fn default_state_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".caws").join(STATE_FILE_NAME))
        .ok_or_else(|| {
            AuthError::SessionStore("home directory not found; cannot store sessions".into())
        })
}

fn load_keyring(service: &str) -> Option<String> {
    let entry = keyring::Entry::new(service, KEYRING_USER).ok()?;
    entry.get_password().ok().filter(|json| !json.trim().is_empty())
}

fn parse_persisted(json: &str) -> Result<Persisted, AuthError> {
    serde_json::from_str(json).map_err(|e| AuthError::SessionStore(format!("parse state: {e}")))
}

fn load_file(path: &Path) -> Result<Option<Persisted>, AuthError> {
    match fs::read_to_string(path) {
        Ok(json) if json.trim().is_empty() => Ok(None),
        Ok(json) => parse_persisted(&json).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AuthError::SessionStore(format!(
            "read {}: {e}",
            path.display()
        ))),
    }
}

fn store_file(path: &Path, json: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::SessionStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, json)
        .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::SessionStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}
