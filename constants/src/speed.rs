/// Speed factor a session starts with.
pub const DEFAULT_SPEED_FACTOR: f32 = 0.3;

/// Upper end of the speed slider.
pub const MAX_SPEED_FACTOR: f32 = 5.0;

/// Step applied by the keyboard speed shortcuts.
pub const SPEED_STEP: f32 = 0.1;
