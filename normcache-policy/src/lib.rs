//! Field policy model for normcache.
//!
//! A field policy controls how one (type, field) pair behaves in the cache:
//!
//! - [`KeyArgs`] — which arguments participate in storage-key derivation
//! - [`FieldPolicy`] — the key spec plus optional merge/read functions
//! - [`FieldPolicyRegistry`] — the per-cache-instance policy table
//! - [`StorageKey`] — the derived slot name inside an entity's field map
//! - [`pagination`] — ready-made offset/limit and full-list policies
//!
//! Policies are registered once at cache configuration time and are
//! immutable afterwards. Everything in this crate is a pure transformation:
//! no I/O, no interior mutability, no global state.

mod key_args;
pub mod pagination;
mod policy;
mod registry;
mod storage_key;

pub use key_args::KeyArgs;
pub use policy::{FieldContext, FieldPolicy, MergeFn, ReadFn};
pub use registry::FieldPolicyRegistry;
pub use storage_key::StorageKey;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Errors that can occur during policy evaluation.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Storage-key derivation failed to serialize an argument value.
    #[error("key derivation error: {0}")]
    Key(#[from] normcache_types::Error),

    /// A merge function rejected the write. The previous stored value
    /// remains authoritative; nothing is installed.
    #[error("merge rejected: {0}")]
    MergeRejected(String),

    /// A read function rejected the access.
    #[error("read rejected: {0}")]
    ReadRejected(String),

    /// A stored or supplied value did not have the shape a policy requires.
    #[error("invalid value shape: {0}")]
    InvalidValue(String),
}
