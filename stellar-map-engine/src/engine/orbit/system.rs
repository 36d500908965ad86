use bevy::math::{Affine3A, Vec3};

use super::params::{OrbitLevel, SpatialConfig};
use super::pivot::Pivot;
use super::tilt::{
    TiltSource, constellation_tilt_name, deterministic_tilt, family_tilt_name, node_tilt_name,
};
use crate::engine::hierarchy::{Hierarchy, constellation_key};
use crate::engine::registry::PositionRegistry;

#[derive(Debug, Clone)]
struct NodeOrbit {
    id: String,
    pivot: Pivot,
}

#[derive(Debug, Clone)]
struct ConstellationOrbit {
    key: String,
    pivot: Pivot,
    nodes: Vec<NodeOrbit>,
}

#[derive(Debug, Clone)]
struct FamilyOrbit {
    name: String,
    pivot: Pivot,
    constellations: Vec<ConstellationOrbit>,
}

/// Sampled orbit ring for drawing.
#[derive(Debug, Clone)]
pub struct OrbitTrail {
    pub level: OrbitLevel,
    pub key: String,
    pub points: Vec<Vec3>,
}

/// Pivot tree mirroring the hierarchy. Sole writer of [`PositionRegistry`].
#[derive(Debug, Clone)]
pub struct OrbitalSystem {
    anchor: Affine3A,
    families: Vec<FamilyOrbit>,
}

impl OrbitalSystem {
    pub fn build(
        hierarchy: &Hierarchy,
        config: &SpatialConfig,
        tilt_source: TiltSource,
        anchor: Vec3,
    ) -> Self {
        let pick_tilt = |level: OrbitLevel, name: String, sibling_tilt: [f32; 2]| match tilt_source {
            TiltSource::NameHash => deterministic_tilt(&name, config.layout(level).name_tilt_range),
            TiltSource::SiblingInterpolation => sibling_tilt,
        };

        let family_count = hierarchy.families().len();
        let mut families = Vec::with_capacity(family_count);

        for (fi, family) in hierarchy.families().iter().enumerate() {
            let Some(params) = config.orbit_params(OrbitLevel::Family, fi, family_count, 0) else {
                continue;
            };
            let tilt = pick_tilt(OrbitLevel::Family, family_tilt_name(&family.name), params.tilt);

            let constellation_count = family.constellations.len();
            let mut constellations = Vec::with_capacity(constellation_count);

            for (ci, constellation) in family.constellations.iter().enumerate() {
                let Some(params) =
                    config.orbit_params(OrbitLevel::Constellation, ci, constellation_count, 0)
                else {
                    continue;
                };
                let tilt = pick_tilt(
                    OrbitLevel::Constellation,
                    constellation_tilt_name(&family.name, &constellation.name),
                    params.tilt,
                );

                let node_count = constellation.nodes.len();
                let nodes = constellation
                    .nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(ni, node)| {
                        let params =
                            config.orbit_params(OrbitLevel::Node, ni, node_count, node.difficulty)?;
                        let tilt = pick_tilt(
                            OrbitLevel::Node,
                            node_tilt_name(&family.name, &constellation.name, &node.id),
                            params.tilt,
                        );
                        Some(NodeOrbit {
                            id: node.id.clone(),
                            pivot: Pivot::new(params, tilt),
                        })
                    })
                    .collect();

                constellations.push(ConstellationOrbit {
                    key: constellation_key(&family.name, &constellation.name),
                    pivot: Pivot::new(params, tilt),
                    nodes,
                });
            }

            families.push(FamilyOrbit {
                name: family.name.clone(),
                pivot: Pivot::new(params, tilt),
                constellations,
            });
        }

        Self {
            anchor: Affine3A::from_translation(anchor),
            families,
        }
    }

    pub fn empty(anchor: Vec3) -> Self {
        Self {
            anchor: Affine3A::from_translation(anchor),
            families: Vec::new(),
        }
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor.translation.into()
    }

    fn pivots_mut(&mut self) -> impl Iterator<Item = &mut Pivot> {
        self.families.iter_mut().flat_map(|family| {
            std::iter::once(&mut family.pivot).chain(family.constellations.iter_mut().flat_map(
                |constellation| {
                    std::iter::once(&mut constellation.pivot)
                        .chain(constellation.nodes.iter_mut().map(|node| &mut node.pivot))
                },
            ))
        })
    }

    pub fn body_count(&self) -> usize {
        self.families
            .iter()
            .map(|f| {
                1 + f
                    .constellations
                    .iter()
                    .map(|c| 1 + c.nodes.len())
                    .sum::<usize>()
            })
            .sum()
    }

    pub fn advance(&mut self, speed_factor: f32, dt: f32) {
        for pivot in self.pivots_mut() {
            pivot.advance(speed_factor, dt);
        }
    }

    /// Compose every pivot chain and write the resulting centers.
    pub fn record_positions(&self, registry: &mut PositionRegistry) {
        for family in &self.families {
            let family_frame = family.pivot.child_frame(&self.anchor);
            registry.record(
                OrbitLevel::Family,
                &family.name,
                family_frame.translation.into(),
            );

            for constellation in &family.constellations {
                let constellation_frame = constellation.pivot.child_frame(&family_frame);
                registry.record(
                    OrbitLevel::Constellation,
                    &constellation.key,
                    constellation_frame.translation.into(),
                );

                for node in &constellation.nodes {
                    let node_frame = node.pivot.child_frame(&constellation_frame);
                    registry.record(OrbitLevel::Node, &node.id, node_frame.translation.into());
                }
            }
        }
        registry.finish_frame();
    }

    /// Current orbit rings of every body, each drawn around its live parent.
    pub fn trails(&self, segments: usize) -> Vec<OrbitTrail> {
        let mut trails = Vec::with_capacity(self.body_count());
        for family in &self.families {
            trails.push(OrbitTrail {
                level: OrbitLevel::Family,
                key: family.name.clone(),
                points: family.pivot.trail(&self.anchor, segments),
            });

            let family_frame = family.pivot.child_frame(&self.anchor);
            for constellation in &family.constellations {
                trails.push(OrbitTrail {
                    level: OrbitLevel::Constellation,
                    key: constellation.key.clone(),
                    points: constellation.pivot.trail(&family_frame, segments),
                });

                let constellation_frame = constellation.pivot.child_frame(&family_frame);
                for node in &constellation.nodes {
                    trails.push(OrbitTrail {
                        level: OrbitLevel::Node,
                        key: node.id.clone(),
                        points: node.pivot.trail(&constellation_frame, segments),
                    });
                }
            }
        }
        trails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hierarchy::build_hierarchy;
    use proptest::prelude::*;
    use serde_json::json;

    fn tree() -> Hierarchy {
        build_hierarchy(&json!({
            "Graphs": {
                "Traversal": [ { "id": "bfs", "difficulty": 2 }, { "id": "dfs", "difficulty": 4 } ],
                "Paths": [ { "id": "dijkstra", "difficulty": 6 } ]
            },
            "Strings": {
                "Matching": [ { "id": "kmp", "difficulty": 5 } ]
            }
        }))
        .unwrap()
        .hierarchy
    }

    fn snapshot(system: &OrbitalSystem) -> PositionRegistry {
        let mut registry = PositionRegistry::default();
        system.record_positions(&mut registry);
        registry
    }

    #[test]
    fn registry_holds_every_body() {
        let system = OrbitalSystem::build(&tree(), &SpatialConfig::default(), TiltSource::NameHash, Vec3::ZERO);
        let registry = snapshot(&system);
        assert_eq!(system.body_count(), 2 + 3 + 4);
        assert_eq!(registry.len(OrbitLevel::Family), 2);
        assert_eq!(registry.len(OrbitLevel::Constellation), 3);
        assert_eq!(registry.len(OrbitLevel::Node), 4);
        assert!(registry.constellation("Graphs-Paths").is_some());
        assert_eq!(registry.frame(), 1);
    }

    #[test]
    fn bodies_sit_at_their_orbit_radius_from_the_parent() {
        let system = OrbitalSystem::build(&tree(), &SpatialConfig::default(), TiltSource::NameHash, Vec3::new(0.0, 2.0, 0.0));
        let registry = snapshot(&system);

        let graphs = registry.family("Graphs").unwrap();
        assert!((graphs.distance(Vec3::new(0.0, 2.0, 0.0)) - 8.0).abs() < 1e-4);

        let paths = registry.constellation("Graphs-Paths").unwrap();
        assert!((paths.distance(graphs) - 7.0).abs() < 1e-4);

        let dijkstra = registry.node("dijkstra").unwrap();
        assert!((dijkstra.distance(paths) - (2.0 + 0.3 * 6.0)).abs() < 1e-4);
    }

    #[test]
    fn rebuilding_reproduces_positions() {
        let config = SpatialConfig::default();
        for source in [TiltSource::NameHash, TiltSource::SiblingInterpolation] {
            let a = snapshot(&OrbitalSystem::build(&tree(), &config, source, Vec3::ZERO));
            let b = snapshot(&OrbitalSystem::build(&tree(), &config, source, Vec3::ZERO));
            for (key, pos) in a.iter(OrbitLevel::Node) {
                assert_eq!(b.node(key), Some(pos));
            }
        }
    }

    #[test]
    fn trails_cover_every_body() {
        let system = OrbitalSystem::build(&tree(), &SpatialConfig::default(), TiltSource::NameHash, Vec3::ZERO);
        let trails = system.trails(32);
        assert_eq!(trails.len(), system.body_count());
        assert!(trails.iter().all(|t| t.points.len() == 33));
    }

    #[test]
    fn empty_hierarchy_records_nothing() {
        let system = OrbitalSystem::build(&Hierarchy::default(), &SpatialConfig::default(), TiltSource::NameHash, Vec3::ZERO);
        let registry = snapshot(&system);
        assert!(registry.is_empty());
        assert_eq!(system.body_count(), 0);
    }

    proptest! {
        #[test]
        fn zero_speed_freezes_every_position(
            warmup in 0.0f32..30.0,
            frames in 1usize..20,
            dt in 0.001f32..0.1,
        ) {
            let mut system = OrbitalSystem::build(&tree(), &SpatialConfig::default(), TiltSource::NameHash, Vec3::ZERO);
            system.advance(1.0, warmup);
            let before = snapshot(&system);

            for _ in 0..frames {
                system.advance(0.0, dt);
            }
            let after = snapshot(&system);

            for level in [OrbitLevel::Family, OrbitLevel::Constellation, OrbitLevel::Node] {
                for (key, pos) in before.iter(level) {
                    prop_assert_eq!(after.get(level, key), Some(pos));
                }
            }
        }
    }
}
