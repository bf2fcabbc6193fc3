//! The read engine: derives the externally visible value for a field access.

use normcache_policy::{FieldContext, FieldPolicy, Result};
use serde_json::Value;

/// Produces the value a consumer sees for the stored slot.
///
/// Without a read function the stored value passes through unchanged
/// (identity read: absent stays absent). With one, the function receives
/// `existing` possibly absent and decides the outcome itself.
///
/// The return is deliberately ternary:
///
/// - `Ok(None)` — cache miss. The field's data is not available; the
///   consumer should treat this as "go fetch".
/// - `Ok(Some(value))` — satisfied hit, even when `value` is an empty list.
/// - `Err(..)` — the read function rejected the access; no value is
///   produced.
///
/// A read function must not conflate the first two: defaulting an absent
/// `existing` to an empty list before slicing reports a miss as a
/// satisfied-but-empty hit.
pub fn read_field_value(
    policy: Option<&FieldPolicy>,
    ctx: &FieldContext,
    existing: Option<&Value>,
) -> Result<Option<Value>> {
    match policy.and_then(FieldPolicy::read) {
        Some(read) => read(existing, ctx),
        None => Ok(existing.cloned()),
    }
}
