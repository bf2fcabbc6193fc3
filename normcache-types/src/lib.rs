//! Core type definitions for normcache.
//!
//! This crate defines the fundamental, policy-agnostic types used throughout
//! the field policy engine:
//! - [`FieldArguments`] — the argument map supplied at a field read or write
//! - [`EntityRef`] — opaque references into the normalized entity graph
//! - [`canonical`] — deterministic JSON encoding for storage-key derivation
//!
//! Policy behavior (key specs, merge/read functions, pagination) belongs in
//! `normcache-policy`, not here.

mod args;
pub mod canonical;
mod reference;

pub use args::FieldArguments;
pub use reference::EntityRef;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("canonicalization error: {0}")]
    Canonicalize(String),

    #[error("invalid entity reference: {0}")]
    InvalidReference(String),
}
