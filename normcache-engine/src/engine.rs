//! Host-facing entry points: key resolution plus merge/read dispatch.

use normcache_policy::{
    FieldContext, FieldPolicy, FieldPolicyRegistry, Result, StorageKey,
};
use normcache_types::FieldArguments;
use serde_json::Value;

use crate::{merge_field_value, read_field_value};

/// The outcome of a field write: install `value` at `storage_key`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    /// The slot the merged value belongs in.
    pub storage_key: StorageKey,
    /// The new snapshot for that slot.
    pub value: Value,
}

/// Policy evaluation for one cache instance.
///
/// Owns the instance's [`FieldPolicyRegistry`]. Every method is a pure
/// transformation — the engine holds no field data, performs no I/O, and is
/// never re-entered concurrently for the same entity's field map (the host
/// serializes writes per slot; snapshots handed back are immutable and may
/// be read freely while a later merge is in flight).
#[derive(Debug, Default)]
pub struct PolicyEngine {
    registry: FieldPolicyRegistry,
}

impl PolicyEngine {
    /// Creates an engine around a configured registry.
    #[must_use]
    pub fn new(registry: FieldPolicyRegistry) -> Self {
        Self { registry }
    }

    /// Registers a policy for a (type, field) pair.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        policy: FieldPolicy,
    ) {
        self.registry.register(type_name, field_name, policy);
    }

    /// The registry this engine consults.
    #[must_use]
    pub fn registry(&self) -> &FieldPolicyRegistry {
        &self.registry
    }

    /// Resolves the storage key for a field access.
    ///
    /// The host calls this on both paths: before a read to locate the slot
    /// to fetch, and before a write to locate the slot whose current value
    /// feeds [`merge_field`](Self::merge_field).
    pub fn storage_key(
        &self,
        type_name: &str,
        field_name: &str,
        args: &FieldArguments,
    ) -> Result<StorageKey> {
        self.registry.storage_key(type_name, field_name, args)
    }

    /// Write path: resolves the key and merges `incoming` with `existing`.
    ///
    /// `existing` is the current snapshot of the resolved slot (`None` when
    /// the slot has never been written). On success the host installs the
    /// returned value; on error nothing is installed and the previous
    /// snapshot stays authoritative.
    pub fn merge_field(
        &self,
        type_name: &str,
        field_name: &str,
        args: &FieldArguments,
        existing: Option<&Value>,
        incoming: Value,
    ) -> Result<FieldWrite> {
        let policy = self.registry.lookup(type_name, field_name);
        let storage_key = self.registry.storage_key(type_name, field_name, args)?;
        let ctx = self.context(type_name, field_name, args, policy);
        tracing::trace!(key = %storage_key, "merging field value");
        let value = merge_field_value(policy, &ctx, existing, incoming)?;
        Ok(FieldWrite { storage_key, value })
    }

    /// Read path: derives the externally visible value from the stored slot.
    ///
    /// `existing` is whatever the host found under the resolved key.
    /// `Ok(None)` is the cache-miss signal — the consumer should fetch;
    /// `Ok(Some(..))` is a satisfied hit even when the value is empty.
    pub fn read_field(
        &self,
        type_name: &str,
        field_name: &str,
        args: &FieldArguments,
        existing: Option<&Value>,
    ) -> Result<Option<Value>> {
        let policy = self.registry.lookup(type_name, field_name);
        let ctx = self.context(type_name, field_name, args, policy);
        tracing::trace!(type_name, field_name, "reading field value");
        read_field_value(policy, &ctx, existing)
    }

    fn context(
        &self,
        type_name: &str,
        field_name: &str,
        args: &FieldArguments,
        policy: Option<&FieldPolicy>,
    ) -> FieldContext {
        let spec = policy.map_or(normcache_policy::KeyArgs::All, FieldPolicy::effective_key_args);
        FieldContext::new(type_name, field_name, args, &spec)
    }
}
