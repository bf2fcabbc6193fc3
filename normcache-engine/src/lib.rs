//! Merge and read engines for normcache.
//!
//! The host cache calls into this crate at two points:
//!
//! - On write, [`PolicyEngine::merge_field`] resolves the storage key and
//!   combines the incoming value with the slot's current snapshot, returning
//!   a [`FieldWrite`] for the host to install.
//! - On read, the host resolves the key, fetches the stored slot, and
//!   [`PolicyEngine::read_field`] turns it into the externally visible
//!   value — `None` meaning "not cached, go fetch", never "empty".
//!
//! The engine holds no field data and performs no I/O: every entity's field
//! map (see [`FieldMap`]) stays with the host's normalization layer, which
//! also serializes writes per slot.

mod engine;
mod field_map;
mod merge;
mod read;

pub use engine::{FieldWrite, PolicyEngine};
pub use field_map::FieldMap;
pub use merge::merge_field_value;
pub use read::read_field_value;
