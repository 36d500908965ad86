use bevy::prelude::*;
use constants::render_settings::{NODE_PICK_RADIUS, ORBIT_TRAIL_COLOUR, ORBIT_TRAIL_OPACITY};

use crate::engine::orbit::OrbitLevel;
use crate::engine::session::StellarMapSession;

const HOVER_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
const SELECTED_COLOUR: Color = Color::srgb(1.0, 0.78, 0.34);

/// Orbit guide rings around each body's live parent.
pub fn draw_orbit_trails(mut gizmos: Gizmos, session: Res<StellarMapSession>) {
    let [r, g, b] = ORBIT_TRAIL_COLOUR;
    let selected = session.selection().selected_node();

    for trail in session.orbit_trails() {
        // Node rings are noise at map scale; only show the inspected one.
        if trail.level == OrbitLevel::Node && selected != Some(trail.key.as_str()) {
            continue;
        }
        gizmos.linestrip(
            trail.points,
            Color::srgba_u8(r, g, b, (ORBIT_TRAIL_OPACITY * 255.0) as u8),
        );
    }
}

/// Rings around the hovered and selected nodes.
pub fn draw_node_highlights(mut gizmos: Gizmos, session: Res<StellarMapSession>) {
    let registry = session.registry();

    if let Some(position) = session.selection().selected_node().and_then(|id| registry.node(id)) {
        gizmos.sphere(
            Isometry3d::from_translation(position),
            NODE_PICK_RADIUS * 1.4,
            SELECTED_COLOUR,
        );
    }

    if let Some(position) = session.selection().hovered_node().and_then(|id| registry.node(id)) {
        gizmos.sphere(Isometry3d::from_translation(position), NODE_PICK_RADIUS, HOVER_COLOUR);
    }
}
