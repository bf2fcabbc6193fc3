//! Per-entity slot storage the host embeds in each normalized entity.

use normcache_policy::StorageKey;
use serde_json::Value;
use std::collections::HashMap;

use crate::FieldWrite;

/// The stored field slots of one normalized entity.
///
/// Ownership stays with the host's normalization layer — the engine never
/// holds one of these. Values are immutable snapshots: [`FieldMap::apply`]
/// replaces a slot wholesale and never edits in place, so snapshots handed
/// out earlier stay valid for readers while a newer write lands. The map is
/// created on the entity's first normalized write and evicted with the
/// entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    slots: HashMap<StorageKey, Value>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored snapshot at a key, if the slot exists.
    ///
    /// `None` means the slot has never been written — distinct from a slot
    /// holding an empty list.
    #[must_use]
    pub fn get(&self, key: &StorageKey) -> Option<&Value> {
        self.slots.get(key)
    }

    /// Installs a completed write, replacing the slot's previous snapshot.
    ///
    /// Returns the displaced snapshot, if the slot was occupied.
    pub fn apply(&mut self, write: FieldWrite) -> Option<Value> {
        self.slots.insert(write.storage_key, write.value)
    }

    /// Returns true if the slot has been written.
    #[must_use]
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Removes a slot, returning its snapshot (host eviction path).
    pub fn remove(&mut self, key: &StorageKey) -> Option<Value> {
        self.slots.remove(key)
    }

    /// The number of written slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over written slots in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&StorageKey, &Value)> {
        self.slots.iter()
    }
}
