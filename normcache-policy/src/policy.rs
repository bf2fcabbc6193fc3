//! The per-field policy record: key spec plus optional merge/read functions.

use normcache_types::FieldArguments;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::{KeyArgs, PolicyError};

/// Context handed to merge and read functions.
#[derive(Debug, Clone)]
pub struct FieldContext {
    /// The object type that owns the field.
    pub type_name: String,
    /// The field being written or read.
    pub field_name: String,
    /// All arguments supplied at the access site.
    pub args: FieldArguments,
    /// The subset of `args` that participated in storage-key derivation.
    pub key_args: FieldArguments,
}

impl FieldContext {
    /// Builds the context for one field access.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        args: &FieldArguments,
        key_spec: &KeyArgs,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            args: args.clone(),
            key_args: key_spec.filter(args),
        }
    }

    /// `type.field` label for diagnostics and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}.{}", self.type_name, self.field_name)
    }
}

/// Combines an existing stored value with an incoming one.
///
/// `existing` is `None` on the first write for a storage key — the function
/// must supply its own default rather than expect one from the engine. The
/// existing snapshot must never be mutated; the function returns a fresh
/// value even when it is structurally similar to the old one.
pub type MergeFn = Arc<
    dyn Fn(Option<&Value>, Value, &FieldContext) -> Result<Value, PolicyError> + Send + Sync,
>;

/// Derives the externally visible value for a field access.
///
/// `Ok(None)` signals a cache miss: the field's data is not available and
/// the consumer may fetch. `Ok(Some(..))` is a satisfied hit even when the
/// value is an empty list. The two must never be conflated.
pub type ReadFn = Arc<
    dyn Fn(Option<&Value>, &FieldContext) -> Result<Option<Value>, PolicyError> + Send + Sync,
>;

/// Cache behavior for one (type, field) pair.
///
/// Immutable once registered. Built with the chainable `with_*` methods:
///
/// ```
/// use normcache_policy::{FieldPolicy, KeyArgs};
///
/// let policy = FieldPolicy::new()
///     .with_key_args(KeyArgs::only(["type"]))
///     .with_merge_fn(|_existing, incoming, _ctx| Ok(incoming));
/// ```
#[derive(Clone, Default)]
pub struct FieldPolicy {
    key_args: Option<KeyArgs>,
    merge: Option<MergeFn>,
    read: Option<ReadFn>,
}

impl FieldPolicy {
    /// Creates an empty policy: default keying, replace-on-write,
    /// identity-on-read.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit key-argument spec.
    #[must_use]
    pub fn with_key_args(mut self, key_args: KeyArgs) -> Self {
        self.key_args = Some(key_args);
        self
    }

    /// Installs a merge function.
    #[must_use]
    pub fn with_merge(mut self, merge: MergeFn) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Installs a merge function from a plain closure.
    #[must_use]
    pub fn with_merge_fn<F>(self, merge: F) -> Self
    where
        F: Fn(Option<&Value>, Value, &FieldContext) -> Result<Value, PolicyError>
            + Send
            + Sync
            + 'static,
    {
        self.with_merge(Arc::new(merge))
    }

    /// Installs a read function.
    #[must_use]
    pub fn with_read(mut self, read: ReadFn) -> Self {
        self.read = Some(read);
        self
    }

    /// Installs a read function from a plain closure.
    #[must_use]
    pub fn with_read_fn<F>(self, read: F) -> Self
    where
        F: Fn(Option<&Value>, &FieldContext) -> Result<Option<Value>, PolicyError>
            + Send
            + Sync
            + 'static,
    {
        self.with_read(Arc::new(read))
    }

    /// The explicitly configured key spec, if any.
    #[must_use]
    pub fn key_args(&self) -> Option<&KeyArgs> {
        self.key_args.as_ref()
    }

    /// The key spec actually used for storage-key derivation.
    ///
    /// With both merge and read present, an unspecified spec defaults to
    /// [`KeyArgs::None`]: the pair is assumed to manage one combined slot
    /// across argument variations. With only one of the two (or neither),
    /// the default is [`KeyArgs::All`], matching unregistered-field storage
    /// which keys on every argument.
    #[must_use]
    pub fn effective_key_args(&self) -> KeyArgs {
        match &self.key_args {
            Some(spec) => spec.clone(),
            None if self.merge.is_some() && self.read.is_some() => KeyArgs::None,
            None => KeyArgs::All,
        }
    }

    /// The merge function, if one is installed.
    #[must_use]
    pub fn merge(&self) -> Option<&MergeFn> {
        self.merge.as_ref()
    }

    /// The read function, if one is installed.
    #[must_use]
    pub fn read(&self) -> Option<&ReadFn> {
        self.read.as_ref()
    }
}

impl fmt::Debug for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPolicy")
            .field("key_args", &self.key_args)
            .field("merge", &self.merge.as_ref().map(|_| "<fn>"))
            .field("read", &self.read.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
