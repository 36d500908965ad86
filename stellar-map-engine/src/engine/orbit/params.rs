use std::f32::consts::TAU;

use constants::spatial::{
    CONSTELLATION_LAYOUT, FAMILY_LAYOUT, LevelLayout, MAX_DIFFICULTY, MIN_ANGULAR_SPEED,
    NODE_LAYOUT, NODE_RADIUS_PER_DIFFICULTY,
};
use serde::{Deserialize, Serialize};

/// Which ring of the map a body orbits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitLevel {
    Family,
    Constellation,
    Node,
}

/// Static orbit description of one body. Computed once per hierarchy build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub radius: f32,
    /// Radians per second at speed factor 1.
    pub angular_speed: f32,
    /// Rotation about X then Z applied to the orbital plane.
    pub tilt: [f32; 2],
    pub initial_angle: f32,
}

/// Per-level layout tables plus the node radius slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialConfig {
    pub family: LevelLayout,
    pub constellation: LevelLayout,
    pub node: LevelLayout,
    pub node_radius_per_difficulty: f32,
    pub min_angular_speed: f32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            family: FAMILY_LAYOUT,
            constellation: CONSTELLATION_LAYOUT,
            node: NODE_LAYOUT,
            node_radius_per_difficulty: NODE_RADIUS_PER_DIFFICULTY,
            min_angular_speed: MIN_ANGULAR_SPEED,
        }
    }
}

impl SpatialConfig {
    pub fn layout(&self, level: OrbitLevel) -> &LevelLayout {
        match level {
            OrbitLevel::Family => &self.family,
            OrbitLevel::Constellation => &self.constellation,
            OrbitLevel::Node => &self.node,
        }
    }

    /// Orbit of the `index`-th of `sibling_count` bodies on `level`.
    ///
    /// Returns `None` when there is nothing to place (`sibling_count == 0`)
    /// or the index is out of range, so no division by zero can leak a NaN.
    pub fn orbit_params(
        &self,
        level: OrbitLevel,
        index: usize,
        sibling_count: usize,
        difficulty: u8,
    ) -> Option<OrbitParams> {
        if index >= sibling_count {
            return None;
        }
        let layout = self.layout(level);

        Some(OrbitParams {
            radius: self.radius(level, index, difficulty),
            angular_speed: self.angular_speed(level, index),
            tilt: sibling_tilt(layout, index, sibling_count),
            initial_angle: distribution_angle(index, sibling_count)?,
        })
    }

    /// Families and constellations step outwards with their index; nodes
    /// step outwards with difficulty instead.
    pub fn radius(&self, level: OrbitLevel, index: usize, difficulty: u8) -> f32 {
        let layout = self.layout(level);
        match level {
            OrbitLevel::Node => {
                let difficulty = difficulty.min(MAX_DIFFICULTY);
                layout.base_radius + self.node_radius_per_difficulty * f32::from(difficulty)
            }
            _ => layout.base_radius + index as f32 * layout.radius_increment,
        }
    }

    /// Outer siblings orbit slower, floored so nothing ever stops or reverses.
    pub fn angular_speed(&self, level: OrbitLevel, index: usize) -> f32 {
        let layout = self.layout(level);
        (layout.base_speed - index as f32 * layout.speed_decrement).max(self.min_angular_speed)
    }
}

/// Evenly spaced start angle. A single child starts at 0.
pub fn distribution_angle(index: usize, sibling_count: usize) -> Option<f32> {
    match sibling_count {
        0 => None,
        1 => Some(0.0),
        n => Some(index as f32 / n as f32 * TAU),
    }
}

/// X tilt interpolated across siblings, Z tilt alternating sign by parity.
pub fn sibling_tilt(layout: &LevelLayout, index: usize, sibling_count: usize) -> [f32; 2] {
    let [min, max] = layout.tilt_range;
    let span = sibling_count.saturating_sub(1).max(1) as f32;
    let x = min + index as f32 / span * (max - min);
    let z = if index % 2 == 0 {
        layout.tilt_z
    } else {
        -layout.tilt_z
    };
    [x, z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn node_radius_follows_difficulty() {
        let config = SpatialConfig::default();
        let radius = |d| {
            config
                .orbit_params(OrbitLevel::Node, 0, 3, d)
                .map(|p| p.radius)
                .unwrap()
        };
        assert!((radius(0) - 2.0).abs() < EPS);
        assert!((radius(5) - 3.5).abs() < EPS);
        assert!((radius(10) - 5.0).abs() < EPS);
    }

    #[test]
    fn groupings_step_outwards_by_index() {
        let config = SpatialConfig::default();
        assert_eq!(config.radius(OrbitLevel::Family, 0, 0), 8.0);
        assert_eq!(config.radius(OrbitLevel::Family, 2, 9), 20.0);
        assert_eq!(config.radius(OrbitLevel::Constellation, 1, 0), 7.0);
    }

    #[test]
    fn no_siblings_means_no_orbit() {
        let config = SpatialConfig::default();
        assert_eq!(distribution_angle(0, 0), None);
        assert!(config.orbit_params(OrbitLevel::Family, 0, 0, 0).is_none());
        assert!(config.orbit_params(OrbitLevel::Node, 3, 3, 0).is_none());
    }

    #[test]
    fn single_child_starts_at_zero() {
        let params = SpatialConfig::default()
            .orbit_params(OrbitLevel::Constellation, 0, 1, 0)
            .unwrap();
        assert_eq!(params.initial_angle, 0.0);
        assert_eq!(params.tilt, [-0.4, 0.3]);
    }

    #[test]
    fn tilt_sweeps_the_range_and_alternates() {
        let layout = &FAMILY_LAYOUT;
        assert_eq!(sibling_tilt(layout, 0, 3), [-0.3, 0.2]);
        let middle = sibling_tilt(layout, 1, 3);
        assert!(middle[0].abs() < EPS);
        assert_eq!(middle[1], -0.2);
        let last = sibling_tilt(layout, 2, 3);
        assert!((last[0] - 0.3).abs() < EPS);
        assert_eq!(last[1], 0.2);
    }

    #[test]
    fn speed_is_floored() {
        let config = SpatialConfig::default();
        assert!((config.angular_speed(OrbitLevel::Node, 1) - 0.30).abs() < EPS);
        assert_eq!(config.angular_speed(OrbitLevel::Node, 50), MIN_ANGULAR_SPEED);
    }

    proptest! {
        #[test]
        fn grouping_radii_strictly_increase(count in 1usize..50) {
            let config = SpatialConfig::default();
            for level in [OrbitLevel::Family, OrbitLevel::Constellation] {
                for i in 1..count {
                    let inner = config.orbit_params(level, i - 1, count, 0).unwrap();
                    let outer = config.orbit_params(level, i, count, 0).unwrap();
                    prop_assert!(outer.radius > inner.radius);
                    prop_assert!(outer.angular_speed <= inner.angular_speed);
                }
            }
        }

        #[test]
        fn start_angles_are_evenly_spread(count in 2usize..64) {
            let step = TAU / count as f32;
            for i in 0..count {
                let angle = distribution_angle(i, count).unwrap();
                prop_assert!((angle - step * i as f32).abs() < 1e-3);
                prop_assert!((0.0..TAU).contains(&angle));
            }
        }

        #[test]
        fn params_are_always_finite(
            level in prop_oneof![
                Just(OrbitLevel::Family),
                Just(OrbitLevel::Constellation),
                Just(OrbitLevel::Node)
            ],
            count in 1usize..200,
            difficulty in 0u8..=255,
        ) {
            let config = SpatialConfig::default();
            for i in 0..count {
                let p = config.orbit_params(level, i, count, difficulty).unwrap();
                prop_assert!(p.radius.is_finite() && p.radius > 0.0);
                prop_assert!(p.angular_speed >= MIN_ANGULAR_SPEED);
                prop_assert!(p.tilt.iter().all(|t| t.is_finite()));
            }
        }
    }
}
