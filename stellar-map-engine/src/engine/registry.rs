use std::collections::HashMap;

use bevy::prelude::*;

use super::orbit::params::OrbitLevel;

/// Live world positions of every body, keyed by family name, constellation
/// key (`"{family}-{constellation}"`) and node id.
///
/// Only the orbital system writes here, once per frame. Everything else
/// (camera, picking, overview, scene sync) reads.
#[derive(Debug, Clone, Default)]
pub struct PositionRegistry {
    families: HashMap<String, Vec3>,
    constellations: HashMap<String, Vec3>,
    nodes: HashMap<String, Vec3>,
    frame: u64,
}

impl PositionRegistry {
    fn table(&self, level: OrbitLevel) -> &HashMap<String, Vec3> {
        match level {
            OrbitLevel::Family => &self.families,
            OrbitLevel::Constellation => &self.constellations,
            OrbitLevel::Node => &self.nodes,
        }
    }

    pub fn get(&self, level: OrbitLevel, key: &str) -> Option<Vec3> {
        self.table(level).get(key).copied()
    }

    pub fn family(&self, name: &str) -> Option<Vec3> {
        self.families.get(name).copied()
    }

    pub fn constellation(&self, key: &str) -> Option<Vec3> {
        self.constellations.get(key).copied()
    }

    pub fn node(&self, id: &str) -> Option<Vec3> {
        self.nodes.get(id).copied()
    }

    pub fn iter(&self, level: OrbitLevel) -> impl Iterator<Item = (&str, Vec3)> {
        self.table(level).iter().map(|(key, pos)| (key.as_str(), *pos))
    }

    pub fn len(&self, level: OrbitLevel) -> usize {
        self.table(level).len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty() && self.constellations.is_empty() && self.nodes.is_empty()
    }

    /// Number of completed write passes since the last clear.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Store a position. Non-finite positions are dropped so a bad frame can
    /// never reach the camera.
    pub(crate) fn record(&mut self, level: OrbitLevel, key: &str, position: Vec3) -> bool {
        if !position.is_finite() {
            warn!("Dropping non-finite {:?} position for `{}`", level, key);
            return false;
        }

        let table = match level {
            OrbitLevel::Family => &mut self.families,
            OrbitLevel::Constellation => &mut self.constellations,
            OrbitLevel::Node => &mut self.nodes,
        };
        // Keys are stable between frames; avoid reallocating them.
        if let Some(slot) = table.get_mut(key) {
            *slot = position;
        } else {
            table.insert(key.to_owned(), position);
        }
        true
    }

    pub(crate) fn finish_frame(&mut self) {
        self.frame += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.families.clear();
        self.constellations.clear();
        self.nodes.clear();
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_overwrites_by_level() {
        let mut registry = PositionRegistry::default();
        assert!(registry.record(OrbitLevel::Node, "n1", Vec3::ONE));
        assert!(registry.record(OrbitLevel::Node, "n1", Vec3::X));
        assert!(registry.record(OrbitLevel::Family, "n1", Vec3::Y));

        assert_eq!(registry.node("n1"), Some(Vec3::X));
        assert_eq!(registry.family("n1"), Some(Vec3::Y));
        assert_eq!(registry.len(OrbitLevel::Node), 1);
        assert!(registry.constellation("n1").is_none());
    }

    #[test]
    fn rejects_non_finite_positions() {
        let mut registry = PositionRegistry::default();
        registry.record(OrbitLevel::Constellation, "F-C", Vec3::ZERO);
        assert!(!registry.record(OrbitLevel::Constellation, "F-C", Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!registry.record(OrbitLevel::Node, "x", Vec3::splat(f32::INFINITY)));
        assert_eq!(registry.constellation("F-C"), Some(Vec3::ZERO));
        assert!(registry.node("x").is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut registry = PositionRegistry::default();
        registry.record(OrbitLevel::Family, "F", Vec3::ONE);
        registry.finish_frame();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.frame(), 0);
    }
}
