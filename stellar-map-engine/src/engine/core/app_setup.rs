use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::path::HIERARCHY_ASSET_EXTENSION;
use crate::engine::assets::hierarchy_snapshot::HierarchySnapshot;
use crate::engine::camera::viewport_camera::{
    apply_camera_pose, camera_controller, spawn_viewport_camera,
};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::hierarchy_loader::{
    HierarchyLoader, load_hierarchy_system, reload_on_asset_change, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::bodies::{spawn_anchor, spawn_bodies, sync_body_transforms};
use crate::engine::scene::gizmos::{draw_node_highlights, draw_orbit_trails};
use crate::engine::session::{MapSettings, StellarMapSession};
use crate::engine::systems::map_events::publish_map_events;
use crate::engine::systems::session_tick::advance_session;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::map_commands::{
    MapCommandEvent, handle_map_commands, handle_map_keyboard_shortcuts,
};
use crate::tools::picking::pointer_picking;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::status_overlay::{spawn_status_overlay, status_text_update_system};

pub fn create_app() -> App {
    create_app_with_settings(MapSettings::default())
}

pub fn create_app_with_settings(settings: MapSettings) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the hierarchy snapshot as a loadable asset type.
        .add_plugins(JsonAssetPlugin::<HierarchySnapshot>::new(&[
            HIERARCHY_ASSET_EXTENSION,
        ]))
        .add_plugins(WebRpcPlugin);

    app.insert_resource(StellarMapSession::new(settings))
        .init_resource::<LoadingProgress>()
        .init_resource::<HierarchyLoader>()
        .add_event::<MapCommandEvent>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_hierarchy_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Input only once the map has something to show.
    let input_systems = (
        camera_controller,
        pointer_picking,
        handle_map_keyboard_shortcuts, // Native shortcuts or no-op for WASM
        handle_map_commands,
        reload_on_asset_change,
    )
        .chain()
        .run_if(in_state(AppState::Running));

    // The clock runs from the first frame so the intro plays during loading.
    let frame_systems = (
        advance_session,
        apply_camera_pose,
        spawn_bodies,
        sync_body_transforms,
        draw_orbit_trails,
        draw_node_highlights,
        publish_map_events,
    )
        .chain();

    app.add_systems(Update, (input_systems, frame_systems).chain());

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, status_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });
    commands.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)));
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    session: Res<StellarMapSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands);
    spawn_viewport_camera(&mut commands, &session);
    spawn_anchor(&mut commands, &mut meshes, &mut materials, session.anchor());

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_status_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
