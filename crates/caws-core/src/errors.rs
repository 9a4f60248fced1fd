//! Cross-cutting error types for the CAWS toolkit.
//!
//! Authentication errors live in `caws-auth` and configuration errors in
//! `caws-config`. Everything converges into `anyhow` in `caws-cli`.

use thiserror::Error;

/// Errors that can be raised while building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (missing or contradictory fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A resource URL could not be mapped onto an organization/project/repository.
    #[error("CAWS URL is invalid, {reason}: {path}")]
    InvalidResourceUrl { path: String, reason: String },
}
