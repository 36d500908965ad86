/// Resting camera position the intro and home flights converge on.
pub const HOME_POSITION: [f32; 3] = [0.0, 35.0, 55.0];

/// Camera position at session start, before the intro flight.
pub const INTRO_START_POSITION: [f32; 3] = [0.0, 50.0, 80.0];

/// World position of the central anchor.
pub const ANCHOR_POSITION: [f32; 3] = [0.0, 0.0, 0.0];

/// Distance under which an interpolated value counts as arrived.
pub const CONVERGENCE_EPSILON: f32 = 0.5;

pub const INTRO_LERP: f32 = 0.12;
pub const HOME_LERP: f32 = 0.06;
pub const ZOOM_POSITION_LERP: f32 = 0.08;
pub const ZOOM_LOOK_AT_LERP: f32 = 0.1;

/// Slow factor used while the free camera follows a focus target.
pub const FOCUS_TRACK_LERP: f32 = 0.05;

/// Direction and distance of the detail-view camera relative to the node.
pub const DETAIL_OFFSET_DIRECTION: [f32; 3] = [1.0, 0.0, 0.0];
pub const DETAIL_OFFSET_DISTANCE: f32 = 5.0;

/// Orbit-control distance band while inspecting a single node.
pub const DETAIL_MIN_DISTANCE: f32 = 3.0;
pub const DETAIL_MAX_DISTANCE: f32 = 15.0;

/// Closest the free camera may dolly towards its target.
pub const FREE_MIN_DISTANCE: f32 = 1.0;

/// Pitch limit for orbit controls (radians).
pub const MAX_PITCH: f32 = 1.55;

pub const ORBIT_ROTATE_SPEED: f32 = 0.7;
pub const ORBIT_ZOOM_SPEED: f32 = 0.7;
