use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::HIERARCHY_ASSET_PATH;
use crate::engine::assets::hierarchy_snapshot::HierarchySnapshot;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::session::StellarMapSession;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Resource, Default)]
pub struct HierarchyLoader {
    handle: Option<Handle<HierarchySnapshot>>,
}

// Start the loading process
pub fn start_loading(
    mut hierarchy_loader: ResMut<HierarchyLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading hierarchy from: {}", HIERARCHY_ASSET_PATH);
    hierarchy_loader.handle = Some(asset_server.load(HIERARCHY_ASSET_PATH));
    loading_progress.hierarchy_requested = true;
}

/// Hand the first loaded snapshot to the session.
pub fn load_hierarchy_system(
    mut loading_progress: ResMut<LoadingProgress>,
    hierarchy_loader: Res<HierarchyLoader>,
    mut session: ResMut<StellarMapSession>,
    asset_server: Res<AssetServer>,
    snapshots: Res<Assets<HierarchySnapshot>>,
) {
    if loading_progress.is_settled() {
        return;
    }
    let Some(handle) = hierarchy_loader.handle.as_ref() else {
        return;
    };

    if let Some(snapshot) = snapshots.get(handle) {
        match session.load_snapshot(&snapshot.0) {
            Ok(warnings) => {
                info!("✓ Hierarchy loaded with {} data warnings", warnings.len());
                loading_progress.warning_count = warnings.len();
                loading_progress.hierarchy_loaded = true;
            }
            Err(err) => {
                error!("Hierarchy snapshot rejected: {}", err);
                loading_progress.hierarchy_failed = true;
            }
        }
    } else if matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)) {
        error!("Hierarchy asset {} failed to load", HIERARCHY_ASSET_PATH);
        loading_progress.hierarchy_failed = true;
    }
}

/// Hot reload: an edited snapshot file swaps the tree in place.
pub fn reload_on_asset_change(
    mut asset_events: EventReader<AssetEvent<HierarchySnapshot>>,
    hierarchy_loader: Res<HierarchyLoader>,
    snapshots: Res<Assets<HierarchySnapshot>>,
    mut session: ResMut<StellarMapSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(handle) = hierarchy_loader.handle.as_ref() else {
        asset_events.clear();
        return;
    };

    let modified = asset_events
        .read()
        .filter(|event| event.is_modified(handle.id()))
        .count();
    if modified == 0 {
        return;
    }

    let Some(snapshot) = snapshots.get(handle) else {
        return;
    };
    match session.load_snapshot(&snapshot.0) {
        Ok(warnings) => {
            info!("Hierarchy reloaded from disk");
            rpc_interface.send_notification(
                "hierarchy_reloaded",
                serde_json::json!({
                    "families": session.hierarchy().families().len(),
                    "nodes": session.hierarchy().node_count(),
                    "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
                }),
            );
        }
        Err(err) => warn!("Ignoring modified hierarchy snapshot: {}", err),
    }
}
