//! Scene entities and debug drawing for the map.
//!
//! Bodies are plain PBR spheres whose transforms are copied from the
//! position registry each frame; rings and highlights are immediate-mode
//! gizmos.

/// Anchor, family, constellation and node spheres.
///
/// Respawned when the session's hierarchy generation changes.
pub mod bodies;

/// Orbit rings and hover/selection highlights.
pub mod gizmos;
