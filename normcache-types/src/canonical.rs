//! Canonical JSON (RFC 8785) encoding for storage-key derivation.
//!
//! Storage keys embed a serialized form of the selected field arguments, so
//! two argument sets that are deeply equal must encode identically no matter
//! how they were constructed. Uses `serde_jcs` which guarantees:
//!
//! - Lexicographic key ordering, applied recursively
//! - No whitespace between tokens
//! - Numbers normalized per ECMAScript/IEEE 754 constraints
//! - Unicode preserved as-is (no normalization)

use serde::Serialize;

use crate::{Error, Result};

/// Serializes a value to an RFC 8785 canonical JSON string.
///
/// # Errors
///
/// Returns [`Error::Canonicalize`] if the value cannot be represented in
/// canonical form (e.g., a non-finite float).
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    serde_jcs::to_string(value).map_err(|e| Error::Canonicalize(e.to_string()))
}
