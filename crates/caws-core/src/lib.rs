//! # caws-core
//!
//! Core types and error types for the CAWS toolkit.
//!
//! This crate provides the foundational types shared across all toolkit crates:
//! - Session, account, and credential structs
//! - Login outcome enum
//! - Explorer context resolved once by callers before shared command logic
//! - Repository references parsed from clone URLs
//! - Cross-cutting error types

pub mod context;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod resource;

pub use context::ExplorerContext;
pub use enums::LoginResult;
pub use errors::CoreError;
pub use identity::{AccessDetails, Account, AccountDetails, Session};
pub use resource::RepoRef;
