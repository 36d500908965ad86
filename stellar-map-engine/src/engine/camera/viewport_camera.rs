use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::controller::OrbitInput;
use crate::engine::session::StellarMapSession;

/// Radians of yaw/pitch per pixel of drag.
const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
/// Pixel-unit scroll is much finer than line-unit scroll.
const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Marks the single 3D camera the map drives.
#[derive(Component)]
pub struct ViewportCamera;

pub fn spawn_viewport_camera(commands: &mut Commands, session: &StellarMapSession) {
    let camera = session.camera();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera.position()).looking_at(camera.look_at(), Vec3::Y),
        ViewportCamera,
    ));
}

/// Collect drag and scroll into one orbit step. Input is consumed even when
/// the current camera state ignores it, so it does not pile up.
pub fn camera_controller(
    mut session: ResMut<StellarMapSession>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        };
    }

    let dragging = mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO;
    let input = OrbitInput {
        yaw: if dragging { -mouse_delta.x * YAW_SENSITIVITY } else { 0.0 },
        pitch: if dragging { mouse_delta.y * PITCH_SENSITIVITY } else { 0.0 },
        dolly: scroll_accum,
    };

    if !input.is_zero() && !session.apply_orbit_input(&input) {
        debug!("Orbit input ignored in {}", session.camera_state());
    }
}

/// Copy the session's camera pose onto the Bevy camera.
pub fn apply_camera_pose(
    session: Res<StellarMapSession>,
    mut camera_query: Query<&mut Transform, With<ViewportCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let camera = session.camera();
    transform.translation = camera.position();
    if camera.position().distance_squared(camera.look_at()) > f32::EPSILON {
        transform.look_at(camera.look_at(), Vec3::Y);
    }
}
