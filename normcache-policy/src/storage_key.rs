//! Storage keys: the slot names inside an entity's field map.

use normcache_types::FieldArguments;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::KeyArgs;

/// The derived name of a stored field slot.
///
/// Either the bare field name (`feed`) or the field name plus the canonical
/// serialization of the selected arguments (`feed({"type":"TOP"})`). Keys
/// are computed fresh on every access and never persisted independently:
/// they are lookup paths into an entity's field map, which the host cache
/// owns and evicts along with the entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derives the storage key for a field access.
    ///
    /// Pure: identical inputs always produce an identical key.
    ///
    /// # Errors
    ///
    /// Fails only when a selected argument value cannot be canonically
    /// serialized.
    pub fn resolve(
        field_name: &str,
        spec: &KeyArgs,
        args: &FieldArguments,
    ) -> Result<Self, normcache_types::Error> {
        let suffix = spec.key_suffix(args)?;
        Ok(Self(format!("{field_name}{suffix}")))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The field-name portion of the key (everything before the argument
    /// suffix).
    #[must_use]
    pub fn field_name(&self) -> &str {
        self.0.split('(').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}
