//! Camera choreography for the stellar map.
//!
//! A pure state machine ([`state`]) and pose controller ([`controller`]) own
//! every camera decision; [`viewport_camera`] only feeds mouse input in and
//! copies the resulting pose onto the Bevy camera.

/// Camera pose, smoothing and orbit controls driven by the state machine.
pub mod controller;

/// Camera states and the legal transitions between them.
pub mod state;

/// Bevy systems bridging mouse input and the camera entity.
pub mod viewport_camera;
