use std::f32::consts::TAU;

use bevy::math::{Affine3A, Quat, Vec3};

use super::params::OrbitParams;

/// Rotating frame a body hangs off. Children are positioned in the frame of
/// their parent pivot, so a constellation's motion is the composition of its
/// family's rotation and its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    params: OrbitParams,
    tilt: [f32; 2],
    angle: f32,
}

impl Pivot {
    /// `tilt` overrides `params.tilt`, which lets the caller pick the tilt source.
    pub fn new(params: OrbitParams, tilt: [f32; 2]) -> Self {
        Self {
            params,
            tilt,
            angle: params.initial_angle,
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn tilt(&self) -> [f32; 2] {
        self.tilt
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Integrate one frame. A zero factor leaves the angle bit-for-bit intact.
    pub fn advance(&mut self, speed_factor: f32, dt: f32) {
        let delta = self.params.angular_speed * speed_factor * dt;
        if delta != 0.0 && delta.is_finite() {
            self.angle = (self.angle + delta).rem_euclid(TAU);
        }
    }

    fn plane_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.tilt[0]) * Quat::from_rotation_z(self.tilt[1])
    }

    pub fn rotation(&self) -> Quat {
        self.plane_rotation() * Quat::from_rotation_y(self.angle)
    }

    /// Frame at the body: rotate about the parent origin, then step out along X.
    pub fn local_transform(&self) -> Affine3A {
        Affine3A::from_quat(self.rotation()) * Affine3A::from_translation(Vec3::X * self.params.radius)
    }

    pub fn child_frame(&self, parent: &Affine3A) -> Affine3A {
        *parent * self.local_transform()
    }

    /// World-space ring the body travels on, closed (first point repeated).
    pub fn trail(&self, parent: &Affine3A, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        let plane = self.plane_rotation();
        (0..=segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * TAU;
                let local = plane * Quat::from_rotation_y(theta) * (Vec3::X * self.params.radius);
                parent.transform_point3(local)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f32, speed: f32, initial_angle: f32) -> OrbitParams {
        OrbitParams {
            radius,
            angular_speed: speed,
            tilt: [0.0, 0.0],
            initial_angle,
        }
    }

    #[test]
    fn untilted_pivot_orbits_in_the_xz_plane() {
        let pivot = Pivot::new(params(4.0, 1.0, 0.0), [0.0, 0.0]);
        let frame = pivot.child_frame(&Affine3A::IDENTITY);
        assert!(frame.translation.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0).into(), 1e-5));

        let quarter = Pivot::new(params(4.0, 1.0, std::f32::consts::FRAC_PI_2), [0.0, 0.0]);
        let frame = quarter.child_frame(&Affine3A::IDENTITY);
        assert!(Vec3::from(frame.translation).abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-5));
    }

    #[test]
    fn children_compose_with_parent_frame() {
        let parent = Pivot::new(params(8.0, 1.0, 0.3), [0.2, -0.1]);
        let child = Pivot::new(params(3.0, 1.0, 1.1), [-0.4, 0.3]);

        let parent_frame = parent.child_frame(&Affine3A::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let child_frame = child.child_frame(&parent_frame);

        let center = Vec3::from(parent_frame.translation);
        let body = Vec3::from(child_frame.translation);
        assert!((body.distance(center) - 3.0).abs() < 1e-4);

        let expected = center + parent.rotation() * child.rotation() * (Vec3::X * 3.0);
        assert!(body.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn zero_factor_freezes_the_angle() {
        let mut pivot = Pivot::new(params(2.0, 0.35, 1.0), [0.1, 0.4]);
        let before = pivot.clone();
        pivot.advance(0.0, 1.0 / 60.0);
        assert_eq!(pivot, before);
        pivot.advance(1.0, f32::NAN);
        assert_eq!(pivot, before);
    }

    #[test]
    fn angle_wraps_into_one_turn() {
        let mut pivot = Pivot::new(params(2.0, 1.0, 6.0), [0.0, 0.0]);
        pivot.advance(1.0, 1.0);
        assert!((0.0..TAU).contains(&pivot.angle()));
        assert!((pivot.angle() - (7.0 - TAU)).abs() < 1e-5);
    }

    #[test]
    fn body_lies_on_its_trail() {
        let pivot = Pivot::new(params(5.0, 1.0, 0.0), [0.3, -0.2]);
        let parent = Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let trail = pivot.trail(&parent, 128);
        assert_eq!(trail.len(), 129);
        assert!(trail[0].abs_diff_eq(trail[128], 1e-4));

        let body = Vec3::from(pivot.child_frame(&parent).translation);
        assert!(body.abs_diff_eq(trail[0], 1e-4));
        for point in &trail {
            assert!((point.distance(Vec3::Y) - 5.0).abs() < 1e-4);
        }
    }
}
