//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration and the
//! `Loading -> Running` transition for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Registers the hierarchy asset type, the RPC bridge and every map system,
/// gating input on the running state.
pub mod app_setup;

/// Application state machine and loading transition.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets.
pub mod window_config;
