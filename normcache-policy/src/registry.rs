//! Per-cache-instance policy table.

use normcache_types::FieldArguments;
use std::collections::HashMap;

use crate::{FieldPolicy, KeyArgs, Result, StorageKey};

/// Maps (type name, field name) to a configured [`FieldPolicy`].
///
/// One registry belongs to one cache instance: construct it explicitly and
/// hand it to the engine. There is no process-wide table, so caches built in
/// tests never share configuration.
#[derive(Debug, Default)]
pub struct FieldPolicyRegistry {
    policies: HashMap<String, HashMap<String, FieldPolicy>>,
}

impl FieldPolicyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a policy for a (type, field) pair.
    ///
    /// A later registration replaces an earlier one — configuration reload
    /// semantics, not an error.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        policy: FieldPolicy,
    ) {
        let type_name = type_name.into();
        let field_name = field_name.into();
        let fields = self.policies.entry(type_name).or_default();
        if fields.contains_key(&field_name) {
            tracing::debug!(%field_name, "replacing registered field policy");
        }
        fields.insert(field_name, policy);
    }

    /// Looks up the policy for a (type, field) pair.
    ///
    /// A miss is not an error: unregistered fields fall back to keying on
    /// every argument, with replace-on-write and identity-on-read behavior.
    #[must_use]
    pub fn lookup(&self, type_name: &str, field_name: &str) -> Option<&FieldPolicy> {
        self.policies.get(type_name)?.get(field_name)
    }

    /// The key spec in effect for a (type, field) pair, registered or not.
    #[must_use]
    pub fn key_spec(&self, type_name: &str, field_name: &str) -> KeyArgs {
        self.lookup(type_name, field_name)
            .map_or(KeyArgs::All, FieldPolicy::effective_key_args)
    }

    /// Resolves the storage key for a field access.
    ///
    /// Delegates argument filtering to the registered policy's effective key
    /// spec, or to the all-arguments default when the field is unregistered.
    ///
    /// # Errors
    ///
    /// Fails only when a selected argument value cannot be canonically
    /// serialized.
    pub fn storage_key(
        &self,
        type_name: &str,
        field_name: &str,
        args: &FieldArguments,
    ) -> Result<StorageKey> {
        let spec = self.key_spec(type_name, field_name);
        Ok(StorageKey::resolve(field_name, &spec, args)?)
    }

    /// The number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.values().map(HashMap::len).sum()
    }

    /// Returns true if no policy is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.values().all(HashMap::is_empty)
    }
}
