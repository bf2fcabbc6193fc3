//! Entity references — opaque handles into the normalized graph.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// A stable reference to a normalized entity stored elsewhere in the cache.
///
/// References stand in for nested objects inside stored field values (most
/// commonly the elements of a paginated list). The policy engine treats them
/// as plain values and never dereferences them; only the host's query layer
/// resolves a reference back into entity fields. Ownership of the referenced
/// entity stays with the normalization layer.
///
/// The JSON form is `{"__ref": "<cache key>"}`, e.g. `{"__ref": "FeedItem:42"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "__ref")]
    key: String,
}

impl EntityRef {
    /// Creates a reference from a full cache key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Creates a reference for an entity from its type name and id.
    #[must_use]
    pub fn for_entity(type_name: &str, id: &str) -> Self {
        Self {
            key: format!("{type_name}:{id}"),
        }
    }

    /// The cache key this reference points at.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The type-name portion of the key, when the key carries one.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.key.split_once(':').map(|(type_name, _)| type_name)
    }

    /// The reference in its stored JSON form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({"__ref": self.key})
    }

    /// Recovers a reference from a stored JSON value, if it is one.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let key = value.get("__ref")?.as_str()?;
        Some(Self::new(key))
    }

    /// Returns true if the value has the stored-reference shape.
    #[must_use]
    pub fn is_ref(value: &Value) -> bool {
        value.get("__ref").is_some_and(Value::is_string)
    }
}

impl TryFrom<&Value> for EntityRef {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        Self::from_value(value)
            .ok_or_else(|| crate::Error::InvalidReference(value.to_string()))
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
