//! Per-frame runtime systems.

/// Forwards session events to the JSON-RPC bridge.
pub mod map_events;

/// Advances the session clock.
pub mod session_tick;

/// Camera state, speed and frame rate readout for native builds.
pub mod status_overlay;
