use serde::Serialize;

use super::hierarchy::{Hierarchy, constellation_key};
use super::registry::PositionRegistry;

const PADDING: f32 = 5.0;
const EMPTY_EXTENT: f32 = 50.0;

/// Top-down (X/Z) bounds of the overview, padded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewNode {
    pub id: String,
    pub title: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewConstellation {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub nodes: Vec<OverviewNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewFamily {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub constellations: Vec<OverviewConstellation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewLayout {
    pub bounds: OverviewBounds,
    pub families: Vec<OverviewFamily>,
}

/// Project every recorded body onto the ground plane for the minimap.
/// Bodies without a recorded position are left out.
pub fn build_overview(hierarchy: &Hierarchy, registry: &PositionRegistry) -> OverviewLayout {
    if hierarchy.is_empty() {
        return OverviewLayout {
            bounds: OverviewBounds {
                min_x: 0.0,
                max_x: 100.0,
                min_y: 0.0,
                max_y: 100.0,
            },
            families: Vec::new(),
        };
    }

    let mut points = Vec::new();
    let mut families = Vec::new();

    for family in hierarchy.families() {
        let Some(family_pos) = registry.family(&family.name) else {
            continue;
        };
        points.push((family_pos.x, family_pos.z));

        let mut constellations = Vec::new();
        for constellation in &family.constellations {
            let key = constellation_key(&family.name, &constellation.name);
            let Some(pos) = registry.constellation(&key) else {
                continue;
            };
            points.push((pos.x, pos.z));

            let nodes: Vec<_> = constellation
                .nodes
                .iter()
                .filter_map(|node| {
                    let p = registry.node(&node.id)?;
                    points.push((p.x, p.z));
                    Some(OverviewNode {
                        id: node.id.clone(),
                        title: node.title.clone(),
                        x: p.x,
                        y: p.z,
                    })
                })
                .collect();

            constellations.push(OverviewConstellation {
                name: constellation.name.clone(),
                x: pos.x,
                y: pos.z,
                nodes,
            });
        }

        families.push(OverviewFamily {
            name: family.name.clone(),
            x: family_pos.x,
            y: family_pos.z,
            constellations,
        });
    }

    OverviewLayout {
        bounds: padded_bounds(&points),
        families,
    }
}

fn padded_bounds(points: &[(f32, f32)]) -> OverviewBounds {
    let (min_x, max_x, min_y, max_y) = if points.is_empty() {
        (-EMPTY_EXTENT, EMPTY_EXTENT, -EMPTY_EXTENT, EMPTY_EXTENT)
    } else {
        points.iter().fold(
            (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
            |(min_x, max_x, min_y, max_y), &(x, y)| {
                (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
            },
        )
    };

    OverviewBounds {
        min_x: min_x - PADDING,
        max_x: max_x + PADDING,
        min_y: min_y - PADDING,
        max_y: max_y + PADDING,
    }
}
