//! The merge engine: combines an incoming field value with the stored slot.

use normcache_policy::{FieldContext, FieldPolicy, Result};
use serde_json::Value;

/// Combines `existing` and `incoming` under the field's policy.
///
/// Without a merge function the incoming value replaces the slot outright.
/// With one, the function receives the literal `None` on the first write for
/// a key — the engine never synthesizes a default, so a merge function that
/// mishandles first-write fails loudly instead of silently producing a
/// guessed value. The existing snapshot is never mutated; the result is a
/// fresh snapshot, which lets callers detect change by identity and lets
/// concurrent readers keep using prior snapshots.
///
/// # Errors
///
/// Propagates any error from the merge function. On error the write must be
/// abandoned: nothing is partially applied and the previous stored value
/// remains authoritative.
pub fn merge_field_value(
    policy: Option<&FieldPolicy>,
    ctx: &FieldContext,
    existing: Option<&Value>,
    incoming: Value,
) -> Result<Value> {
    match policy.and_then(FieldPolicy::merge) {
        Some(merge) => merge(existing, incoming, ctx),
        None => Ok(incoming),
    }
}
