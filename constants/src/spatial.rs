/// Orbit layout constants for one hierarchy level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelLayout {
    /// Radius of the first sibling's orbit.
    pub base_radius: f32,
    /// Radius added per sibling index (Family and Constellation levels).
    pub radius_increment: f32,
    /// Angular speed of the first sibling, radians per second at speed factor 1.
    pub base_speed: f32,
    /// Angular speed removed per sibling index.
    pub speed_decrement: f32,
    /// Range the sibling-interpolated X tilt spans.
    pub tilt_range: [f32; 2],
    /// Magnitude of the parity-alternating Z tilt.
    pub tilt_z: f32,
    /// Range the name-hash tilt is rescaled into.
    pub name_tilt_range: [f32; 2],
}

/// Radius of the central anchor body.
pub const ANCHOR_RADIUS: f32 = 1.5;

/// Families orbit the anchor.
pub const FAMILY_LAYOUT: LevelLayout = LevelLayout {
    base_radius: 8.0,
    radius_increment: 6.0,
    base_speed: 0.15,
    speed_decrement: 0.02,
    tilt_range: [-0.3, 0.3],
    tilt_z: 0.2,
    name_tilt_range: [-0.3, 0.3],
};

/// Constellations orbit their family center.
pub const CONSTELLATION_LAYOUT: LevelLayout = LevelLayout {
    base_radius: 4.0,
    radius_increment: 3.0,
    base_speed: 0.25,
    speed_decrement: 0.03,
    tilt_range: [-0.4, 0.4],
    tilt_z: 0.3,
    name_tilt_range: [-0.4, 0.4],
};

/// Nodes orbit their constellation center; radius grows with difficulty instead of index.
pub const NODE_LAYOUT: LevelLayout = LevelLayout {
    base_radius: 2.0,
    radius_increment: 0.5,
    base_speed: 0.35,
    speed_decrement: 0.05,
    tilt_range: [-0.5, 0.5],
    tilt_z: 0.4,
    name_tilt_range: [-0.5, 0.5],
};

/// Orbit radius added per difficulty point.
pub const NODE_RADIUS_PER_DIFFICULTY: f32 = 0.3;

/// Highest difficulty a node may carry.
pub const MAX_DIFFICULTY: u8 = 10;

/// Angular speeds never drop below this, so far siblings keep their direction.
pub const MIN_ANGULAR_SPEED: f32 = 0.01;

/// Segments used when sampling an orbit ring.
pub const ORBIT_TRAIL_SEGMENTS: usize = 128;
