//! Shared tuning constants for the stellar map.
//!
//! Values mirror the layout the map shipped with; the engine wraps them in
//! `Default` impls so callers can still override them per session.

/// Camera choreography constants: home pose, smoothing factors and distance bands.
pub mod camera;

/// Colours and body sizes for the rendered scene.
pub mod render_settings;

/// Orbit layout constants per hierarchy level.
pub mod spatial;

/// Time-scale defaults for orbital motion.
pub mod speed;
