//! Orbital layout and motion.
//!
//! Every body rides a [`pivot::Pivot`] nested inside its parent's pivot:
//! anchor -> family -> constellation -> node. Radii, speeds and start angles
//! come from [`params`]; tilts from [`tilt`]. [`system::OrbitalSystem`]
//! advances the tree and publishes world positions once per frame.

/// Orbit radius, speed, tilt and start angle per hierarchy level.
pub mod params;

/// Rotating frames and orbit ring sampling.
pub mod pivot;

/// Pivot tree built from the hierarchy; writes the position registry.
pub mod system;

/// Deterministic name-hash tilts.
pub mod tilt;

pub use params::{OrbitLevel, OrbitParams, SpatialConfig};
pub use system::{OrbitTrail, OrbitalSystem};
pub use tilt::TiltSource;
