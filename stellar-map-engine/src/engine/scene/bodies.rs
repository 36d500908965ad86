use bevy::prelude::*;
use constants::render_settings::{
    ANCHOR_COLOUR, CONSTELLATION_MARKER_COLOUR, CONSTELLATION_MARKER_RADIUS, FAMILY_MARKER_COLOUR,
    FAMILY_MARKER_RADIUS, NODE_COLOURS, NODE_EMISSIVE_COLOURS, NODE_RADIUS, palette_index,
};
use constants::spatial::ANCHOR_RADIUS;

use crate::engine::hierarchy::constellation_key;
use crate::engine::orbit::OrbitLevel;
use crate::engine::session::{MapBody, StellarMapSession};

/// Rendered body, positioned from the registry every frame.
#[derive(Component)]
pub struct OrbitBody {
    pub level: OrbitLevel,
    pub key: String,
}

#[derive(Component)]
pub struct AnchorBody;

fn srgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

pub fn spawn_anchor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) {
    let colour = srgb(ANCHOR_COLOUR);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(ANCHOR_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: colour,
            emissive: colour.to_linear() * 2.0,
            ..default()
        })),
        Transform::from_translation(position),
        AnchorBody,
    ));
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(position),
    ));
}

/// Respawn body entities whenever the session swaps its hierarchy.
pub fn spawn_bodies(
    mut commands: Commands,
    session: Res<StellarMapSession>,
    existing: Query<Entity, With<OrbitBody>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut spawned_generation: Local<u64>,
) {
    if *spawned_generation == session.generation() {
        return;
    }
    *spawned_generation = session.generation();

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let family_mesh = meshes.add(Sphere::new(FAMILY_MARKER_RADIUS));
    let constellation_mesh = meshes.add(Sphere::new(CONSTELLATION_MARKER_RADIUS));
    let node_mesh = meshes.add(Sphere::new(NODE_RADIUS));

    let family_material = materials.add(StandardMaterial {
        base_color: srgb(FAMILY_MARKER_COLOUR),
        emissive: srgb(FAMILY_MARKER_COLOUR).to_linear(),
        ..default()
    });
    let constellation_material = materials.add(StandardMaterial {
        base_color: srgb(CONSTELLATION_MARKER_COLOUR),
        emissive: srgb(CONSTELLATION_MARKER_COLOUR).to_linear(),
        ..default()
    });
    let node_materials: Vec<Handle<StandardMaterial>> = NODE_COLOURS
        .iter()
        .zip(NODE_EMISSIVE_COLOURS.iter())
        .map(|(base, emissive)| {
            materials.add(StandardMaterial {
                base_color: srgb(*base),
                emissive: srgb(*emissive).to_linear() * 0.6,
                ..default()
            })
        })
        .collect();

    let hierarchy = session.hierarchy();
    let mut count = 0;
    for body in session.bodies() {
        let (mesh, material, key) = match &body.body {
            MapBody::Family { family } => {
                (family_mesh.clone(), family_material.clone(), family.clone())
            }
            MapBody::Constellation {
                family,
                constellation,
            } => (
                constellation_mesh.clone(),
                constellation_material.clone(),
                constellation_key(family, constellation),
            ),
            MapBody::Node { id } => {
                let difficulty = hierarchy
                    .find_node(id)
                    .map(|location| location.node.difficulty)
                    .unwrap_or_default();
                (
                    node_mesh.clone(),
                    node_materials[palette_index(difficulty)].clone(),
                    id.clone(),
                )
            }
        };

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(body.position),
            OrbitBody {
                level: body.body.level(),
                key,
            },
        ));
        count += 1;
    }

    info!("Spawned {} orbit bodies (generation {})", count, *spawned_generation);
}

pub fn sync_body_transforms(
    session: Res<StellarMapSession>,
    mut bodies: Query<(&OrbitBody, &mut Transform)>,
) {
    let registry = session.registry();
    for (body, mut transform) in &mut bodies {
        if let Some(position) = registry.get(body.level, &body.key) {
            transform.translation = position;
        }
    }
}
