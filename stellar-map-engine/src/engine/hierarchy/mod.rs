//! Family -> Constellation -> Node tree built from a nested JSON snapshot.
//!
//! The tree is immutable once built. A reload replaces it wholesale.

/// Snapshot parsing with data-quality reporting.
pub mod builder;

/// Tree types, lookups and grouping search.
pub mod model;

pub use builder::{BuildReport, DataWarning, HierarchyError, build_hierarchy, parse_hierarchy};
pub use model::{
    Constellation, Family, GroupingMatch, Hierarchy, Node, NodeLocation, constellation_key,
};
