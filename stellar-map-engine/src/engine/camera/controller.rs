use bevy::prelude::*;
use constants::camera::{
    ANCHOR_POSITION, CONVERGENCE_EPSILON, DETAIL_MAX_DISTANCE, DETAIL_MIN_DISTANCE,
    DETAIL_OFFSET_DIRECTION, DETAIL_OFFSET_DISTANCE, FOCUS_TRACK_LERP, FREE_MIN_DISTANCE,
    HOME_LERP, HOME_POSITION, INTRO_LERP, INTRO_START_POSITION, MAX_PITCH, ORBIT_ROTATE_SPEED,
    ORBIT_ZOOM_SPEED, ZOOM_LOOK_AT_LERP, ZOOM_POSITION_LERP,
};

use super::state::{CameraState, TransitionError};

/// Camera choreography tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub home_position: Vec3,
    pub intro_start: Vec3,
    pub anchor: Vec3,
    pub epsilon: f32,
    pub intro_lerp: f32,
    pub home_lerp: f32,
    pub zoom_position_lerp: f32,
    pub zoom_look_at_lerp: f32,
    pub focus_track_lerp: f32,
    /// Camera offset from the node while zooming in and in detail view.
    pub detail_offset: Vec3,
    pub detail_min_distance: f32,
    pub detail_max_distance: f32,
    pub free_min_distance: f32,
    pub max_pitch: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home_position: Vec3::from_array(HOME_POSITION),
            intro_start: Vec3::from_array(INTRO_START_POSITION),
            anchor: Vec3::from_array(ANCHOR_POSITION),
            epsilon: CONVERGENCE_EPSILON,
            intro_lerp: INTRO_LERP,
            home_lerp: HOME_LERP,
            zoom_position_lerp: ZOOM_POSITION_LERP,
            zoom_look_at_lerp: ZOOM_LOOK_AT_LERP,
            focus_track_lerp: FOCUS_TRACK_LERP,
            detail_offset: Vec3::from_array(DETAIL_OFFSET_DIRECTION).normalize_or_zero()
                * DETAIL_OFFSET_DISTANCE,
            detail_min_distance: DETAIL_MIN_DISTANCE,
            detail_max_distance: DETAIL_MAX_DISTANCE,
            free_min_distance: FREE_MIN_DISTANCE,
            max_pitch: MAX_PITCH,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

/// Orbit-control envelope for the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    fn for_state(state: CameraState, config: &CameraConfig) -> Self {
        match state {
            CameraState::DetailView => Self {
                enabled: true,
                min_distance: config.detail_min_distance,
                max_distance: config.detail_max_distance,
            },
            other => Self {
                enabled: other.controls_enabled(),
                min_distance: config.free_min_distance,
                max_distance: f32::INFINITY,
            },
        }
    }
}

/// One frame of user orbit input, already scaled to radians and dolly steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    pub yaw: f32,
    pub pitch: f32,
    /// Positive moves towards the target.
    pub dolly: f32,
}

impl OrbitInput {
    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0 && self.dolly == 0.0
    }
}

/// Live targets the camera follows this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTargets {
    /// Resolved focus position (anchor, family or constellation center).
    pub focus: Vec3,
    /// Live position of the selected node, if any.
    pub node: Option<Vec3>,
}

/// Camera pose plus the state machine driving it.
///
/// Explicit transitions come from user commands through [`Self::transition`];
/// arrival transitions (intro done, zoom done, home reached) happen inside
/// [`Self::update`].
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    position: Vec3,
    look_at: Vec3,
    controls: OrbitControls,
    config: CameraConfig,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            state: CameraState::IntroAnimation,
            position: config.intro_start,
            look_at: config.anchor,
            controls: OrbitControls::for_state(CameraState::IntroAnimation, &config),
            config,
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn transition(&mut self, next: CameraState) -> Result<(), TransitionError> {
        self.state.check_transition(next)?;
        info!("Camera {} -> {}", self.state, next);
        self.state = next;
        self.controls = OrbitControls::for_state(next, &self.config);
        Ok(())
    }

    /// Advance the choreography one frame. Returns the new state when an
    /// arrival transition fired.
    pub fn update(&mut self, targets: &CameraTargets) -> Option<CameraState> {
        let eps = self.config.epsilon;
        match self.state {
            CameraState::IntroAnimation => {
                let home = self.config.home_position;
                self.position = self.position.lerp(home, self.config.intro_lerp);
                self.look_at = self.config.anchor;
                if self.position.distance(home) < eps {
                    self.position = home;
                    return self.arrive(CameraState::Free);
                }
            }
            CameraState::Free => {
                // Keep the current offset while the look-at eases onto the focus.
                let tracked = self.look_at.lerp(targets.focus, self.config.focus_track_lerp);
                self.position += tracked - self.look_at;
                self.look_at = tracked;
            }
            CameraState::ZoomingIn => {
                let node = targets.node?;
                let desired = node + self.config.detail_offset;
                self.position = self.position.lerp(desired, self.config.zoom_position_lerp);
                self.look_at = self.look_at.lerp(node, self.config.zoom_look_at_lerp);
                if self.position.distance(desired) < eps && self.look_at.distance(node) < eps {
                    return self.arrive(CameraState::DetailView);
                }
            }
            CameraState::DetailView => {
                if let Some(node) = targets.node {
                    self.position += node - self.look_at;
                    self.look_at = node;
                }
                self.clamp_distance();
            }
            CameraState::MovingToHome => {
                let home = self.config.home_position;
                let anchor = self.config.anchor;
                self.position = self.position.lerp(home, self.config.home_lerp);
                self.look_at = self.look_at.lerp(anchor, self.config.home_lerp);
                if self.position.distance(home) < eps && self.look_at.distance(anchor) < eps {
                    self.position = home;
                    self.look_at = anchor;
                    return self.arrive(CameraState::Free);
                }
            }
        }
        None
    }

    fn arrive(&mut self, next: CameraState) -> Option<CameraState> {
        match self.transition(next) {
            Ok(()) => Some(next),
            Err(err) => {
                error!("Arrival transition refused: {err}");
                None
            }
        }
    }

    /// Spherical orbit around the look-at point. Ignored while controls are off.
    pub fn apply_input(&mut self, input: &OrbitInput) -> bool {
        if !self.controls.enabled || input.is_zero() {
            return false;
        }

        let offset = self.position - self.look_at;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }

        let yaw = offset.x.atan2(offset.z) + input.yaw * self.config.rotate_speed;
        let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin()
            + input.pitch * self.config.rotate_speed)
            .clamp(-self.config.max_pitch, self.config.max_pitch);
        let radius = (radius * (-input.dolly * self.config.zoom_speed * 0.1).exp())
            .clamp(self.controls.min_distance, self.controls.max_distance);

        self.position = self.look_at
            + Vec3::new(
                radius * pitch.cos() * yaw.sin(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.cos(),
            );
        true
    }

    fn clamp_distance(&mut self) {
        let offset = self.position - self.look_at;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let clamped = distance.clamp(self.controls.min_distance, self.controls.max_distance);
        if clamped != distance {
            self.position = self.look_at + offset * (clamped / distance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(focus: Vec3, node: Option<Vec3>) -> CameraTargets {
        CameraTargets { focus, node }
    }

    fn finish_intro(camera: &mut CameraController) {
        for _ in 0..200 {
            if camera.update(&targets(Vec3::ZERO, None)) == Some(CameraState::Free) {
                return;
            }
        }
        panic!("intro never finished");
    }

    #[test]
    fn intro_flies_home_then_frees_controls() {
        let mut camera = CameraController::default();
        assert!(!camera.controls().enabled);
        assert!(!camera.apply_input(&OrbitInput {
            yaw: 1.0,
            ..default()
        }));
        finish_intro(&mut camera);
        assert_eq!(camera.position(), camera.config().home_position);
        assert!(camera.controls().enabled);
        assert_eq!(camera.controls().max_distance, f32::INFINITY);
    }

    #[test]
    fn zoom_converges_and_detail_follows_node() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        camera.transition(CameraState::ZoomingIn).unwrap();

        let node = Vec3::new(10.0, 2.0, -4.0);
        let mut arrived = false;
        for _ in 0..500 {
            if camera.update(&targets(Vec3::ZERO, Some(node))) == Some(CameraState::DetailView) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(camera.look_at().distance(node) < camera.config().epsilon);
        assert_eq!(*camera.controls(), OrbitControls {
            enabled: true,
            min_distance: 3.0,
            max_distance: 15.0
        });

        let offset = camera.position() - camera.look_at();
        let moved = node + Vec3::new(0.5, 0.0, 0.5);
        camera.update(&targets(Vec3::ZERO, Some(moved)));
        assert_eq!(camera.look_at(), moved);
        assert!((camera.position() - camera.look_at()).abs_diff_eq(offset, 1e-4));
    }

    #[test]
    fn detail_view_keeps_dolly_inside_band() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        camera.transition(CameraState::ZoomingIn).unwrap();
        let node = Vec3::new(3.0, 0.0, 3.0);
        while camera.update(&targets(Vec3::ZERO, Some(node))) != Some(CameraState::DetailView) {}
        // First detail frame pins the look-at onto the node.
        camera.update(&targets(Vec3::ZERO, Some(node)));

        for _ in 0..100 {
            camera.apply_input(&OrbitInput {
                dolly: 5.0,
                ..default()
            });
        }
        assert!((camera.position().distance(node) - 3.0).abs() < 1e-3);

        for _ in 0..100 {
            camera.apply_input(&OrbitInput {
                dolly: -5.0,
                ..default()
            });
        }
        assert!((camera.position().distance(node) - 15.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        for _ in 0..50 {
            camera.apply_input(&OrbitInput {
                pitch: 1.0,
                ..default()
            });
        }
        let offset = camera.position() - camera.look_at();
        let pitch = (offset.y / offset.length()).asin();
        assert!(pitch <= camera.config().max_pitch + 1e-4);
    }

    #[test]
    fn free_camera_eases_onto_focus_keeping_offset() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        let offset = camera.position() - camera.look_at();
        let focus = Vec3::new(20.0, 0.0, 0.0);
        for _ in 0..400 {
            camera.update(&targets(focus, None));
        }
        assert!(camera.look_at().distance(focus) < 1e-2);
        assert!((camera.position() - camera.look_at()).abs_diff_eq(offset, 1e-2));
    }

    #[test]
    fn home_flight_snaps_and_frees() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        camera.transition(CameraState::ZoomingIn).unwrap();
        for _ in 0..20 {
            camera.update(&targets(Vec3::ZERO, Some(Vec3::new(12.0, 0.0, 0.0))));
        }
        camera.transition(CameraState::MovingToHome).unwrap();
        assert!(!camera.controls().enabled);

        let mut result = None;
        for _ in 0..500 {
            result = camera.update(&targets(Vec3::ZERO, None));
            if result.is_some() {
                break;
            }
        }
        assert_eq!(result, Some(CameraState::Free));
        assert_eq!(camera.position(), camera.config().home_position);
        assert_eq!(camera.look_at(), camera.config().anchor);
    }

    #[test]
    fn zoom_without_target_holds_still() {
        let mut camera = CameraController::default();
        finish_intro(&mut camera);
        camera.transition(CameraState::ZoomingIn).unwrap();
        let before = camera.position();
        assert_eq!(camera.update(&targets(Vec3::ZERO, None)), None);
        assert_eq!(camera.position(), before);
    }
}
