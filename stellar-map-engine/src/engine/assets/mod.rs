//! Asset types loaded through the JSON asset plugin.

/// Nested family -> constellation -> node mapping as loaded from disk.
pub mod hierarchy_snapshot;
