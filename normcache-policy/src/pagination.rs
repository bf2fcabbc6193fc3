//! Ready-made pagination policies.
//!
//! [`offset_limit_policy`] accumulates pages written at arbitrary offsets
//! into one stored list and serves clamped sub-ranges on read.
//! [`full_list_policy`] accumulates the same way but hands the whole stored
//! list back, for consumers that own their windowing (e.g. continuously
//! scrolling views whose visible window moves independently of cache reads).
//!
//! Both pair a merge with a read and set no explicit key spec, so they key
//! by no arguments: every page for the field lands in one shared slot.
//! Override with [`FieldPolicy::with_key_args`] to partition slots by a
//! subset of arguments (say, a feed `type`) while still merging pages
//! within each slot.

use serde_json::Value;
use std::sync::Arc;

use crate::{FieldContext, FieldPolicy, MergeFn, PolicyError, ReadFn};

/// A policy that merges offset/limit pages and reads clamped sub-ranges.
#[must_use]
pub fn offset_limit_policy() -> FieldPolicy {
    FieldPolicy::new()
        .with_merge(offset_limit_merge())
        .with_read(offset_limit_read())
}

/// A policy that merges offset/limit pages and reads the whole stored list.
#[must_use]
pub fn full_list_policy() -> FieldPolicy {
    FieldPolicy::new()
        .with_merge(offset_limit_merge())
        .with_read(full_list_read())
}

/// Merge function: writes the incoming page over slots
/// `[offset, offset + page length)` of the stored list.
///
/// The stored value is treated as a sparse list: writing past the current
/// end fills the gap with `null` so a later page can land in it. Pages may
/// arrive out of order, overlap, or repeat; each write only touches the
/// extent its own offset and length describe, so the slot converges to the
/// same combined list regardless of arrival order.
#[must_use]
pub fn offset_limit_merge() -> MergeFn {
    Arc::new(|existing, incoming, ctx| {
        let offset = index_arg(ctx, "offset")?.unwrap_or(0);
        let page = into_list(incoming, ctx)?;
        let mut combined = match existing {
            Some(value) => as_list(value, ctx)?.clone(),
            None => Vec::new(),
        };
        if combined.len() < offset {
            combined.resize(offset, Value::Null);
        }
        for (i, item) in page.into_iter().enumerate() {
            let slot = offset + i;
            if slot < combined.len() {
                combined[slot] = item;
            } else {
                combined.push(item);
            }
        }
        Ok(Value::Array(combined))
    })
}

/// Read function: returns `[offset, offset + limit)` clamped to the stored
/// length, with `offset` defaulting to 0 and `limit` to the remaining
/// length.
///
/// An absent stored value stays absent — an uncached field is a miss to be
/// fetched, never an empty page. A stored empty list reads as an empty
/// list: a satisfied, legitimately empty hit.
#[must_use]
pub fn offset_limit_read() -> ReadFn {
    Arc::new(|existing, ctx| {
        let Some(value) = existing else {
            return Ok(None);
        };
        let list = as_list(value, ctx)?;
        let offset = index_arg(ctx, "offset")?.unwrap_or(0).min(list.len());
        let limit = index_arg(ctx, "limit")?.unwrap_or(list.len() - offset);
        let end = offset.saturating_add(limit).min(list.len());
        Ok(Some(Value::Array(list[offset..end].to_vec())))
    })
}

/// Read function that ignores arguments and returns the stored list
/// verbatim (absent stays absent).
#[must_use]
pub fn full_list_read() -> ReadFn {
    Arc::new(|existing, _ctx| Ok(existing.cloned()))
}

fn index_arg(ctx: &FieldContext, name: &str) -> Result<Option<usize>, PolicyError> {
    match ctx.args.get(name) {
        None => Ok(None),
        Some(value) => match value.as_u64() {
            Some(n) => Ok(Some(n as usize)),
            None => Err(PolicyError::InvalidValue(format!(
                "{}: argument `{name}` must be a non-negative integer, got {value}",
                ctx.label()
            ))),
        },
    }
}

fn as_list<'a>(value: &'a Value, ctx: &FieldContext) -> Result<&'a Vec<Value>, PolicyError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(PolicyError::InvalidValue(format!(
            "{}: expected a stored list, got {other}",
            ctx.label()
        ))),
    }
}

fn into_list(value: Value, ctx: &FieldContext) -> Result<Vec<Value>, PolicyError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(PolicyError::InvalidValue(format!(
            "{}: expected an incoming list, got {other}",
            ctx.label()
        ))),
    }
}
