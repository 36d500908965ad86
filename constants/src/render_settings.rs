/// Sphere radius of a family center marker (also its click target).
pub const FAMILY_MARKER_RADIUS: f32 = 0.3;

/// Sphere radius of a constellation center marker (also its click target).
pub const CONSTELLATION_MARKER_RADIUS: f32 = 0.2;

/// Rendered sphere radius of a node.
pub const NODE_RADIUS: f32 = 0.08;

/// Nodes are tiny on screen; picking uses a larger sphere.
pub const NODE_PICK_RADIUS: f32 = 0.35;

/// sRGB base colours by difficulty 1..=10; difficulty 0 uses the first entry.
pub const NODE_COLOURS: [[u8; 3]; 10] = [
    [0x7d, 0xd3, 0xfc],
    [0x60, 0xa5, 0xfa],
    [0x3b, 0x82, 0xf6],
    [0x25, 0x63, 0xeb],
    [0x8b, 0x5c, 0xf6],
    [0x7c, 0x3a, 0xed],
    [0xa8, 0x55, 0xf7],
    [0xec, 0x48, 0x99],
    [0xf4, 0x3f, 0x5e],
    [0xef, 0x44, 0x44],
];

/// sRGB emissive colours by difficulty 1..=10.
pub const NODE_EMISSIVE_COLOURS: [[u8; 3]; 10] = [
    [0x0e, 0xa5, 0xe9],
    [0x3b, 0x82, 0xf6],
    [0x25, 0x63, 0xeb],
    [0x1d, 0x4e, 0xd8],
    [0x7c, 0x3a, 0xed],
    [0x6d, 0x28, 0xd9],
    [0x93, 0x33, 0xea],
    [0xdb, 0x27, 0x77],
    [0xdc, 0x26, 0x26],
    [0xb9, 0x1c, 0x1c],
];

pub const ANCHOR_COLOUR: [u8; 3] = [0xff, 0xc8, 0x57];
pub const FAMILY_MARKER_COLOUR: [u8; 3] = [0xff, 0x6b, 0x6b];
pub const CONSTELLATION_MARKER_COLOUR: [u8; 3] = [0x4e, 0xcd, 0xc4];

/// Orbit guide ring colour and opacity.
pub const ORBIT_TRAIL_COLOUR: [u8; 3] = [0xff, 0xff, 0xff];
pub const ORBIT_TRAIL_OPACITY: f32 = 0.15;

/// Pick the palette entry for a difficulty.
pub fn palette_index(difficulty: u8) -> usize {
    (difficulty.max(1) as usize - 1).min(NODE_COLOURS.len() - 1)
}
