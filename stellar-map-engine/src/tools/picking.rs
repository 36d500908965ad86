use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::state::CameraState;
use crate::engine::camera::viewport_camera::ViewportCamera;
use crate::engine::session::{BodySnapshot, MapBody, PointerInfo, SessionError, StellarMapSession};

/// Nearest non-negative ray parameter at which the ray meets the sphere.
/// `dir` must be normalised.
pub fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, centre: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - centre;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if far < 0.0 {
        return None;
    }
    // Origin inside the sphere hits at the exit point.
    Some(if near >= 0.0 { near } else { far })
}

/// Closest body along the ray.
pub fn pick_body<'a>(origin: Vec3, dir: Vec3, bodies: &'a [BodySnapshot]) -> Option<&'a BodySnapshot> {
    bodies
        .iter()
        .filter_map(|body| {
            ray_sphere_hit_t(origin, dir, body.position, body.radius).map(|t| (body, t))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(body, _)| body)
}

/// Hover follows the cursor over nodes; a left click selects whatever body
/// is under it.
pub fn pointer_picking(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<ViewportCamera>>,
    mut session: ResMut<StellarMapSession>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };

    // No picking until the intro hands over control.
    if session.camera_state() == CameraState::IntroAnimation {
        return;
    }

    let Some(cursor_pos) = window.cursor_position() else {
        if session.selection().hovered_node().is_some() {
            report_rejection(session.hover_node(None, None), "Hover clear");
        }
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };

    let bodies = session.bodies();
    let hit = pick_body(ray.origin, ray.direction.as_vec3(), &bodies).map(|hit| hit.body.clone());
    let pointer = PointerInfo {
        x: cursor_pos.x,
        y: cursor_pos.y,
    };

    let hovered = match &hit {
        Some(MapBody::Node { id }) => Some(id.as_str()),
        _ => None,
    };
    report_rejection(session.hover_node(hovered, Some(pointer)), "Hover");

    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(body) = hit else {
        return;
    };
    report_rejection(session.click_body(&body), "Click");
}

fn report_rejection(result: Result<(), SessionError>, what: &str) {
    match result {
        Ok(()) => {}
        Err(SessionError::InputLocked(state)) => debug!("{} ignored during {}", what, state),
        Err(err) => warn!("{} rejected: {}", what, err),
    }
}
