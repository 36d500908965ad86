use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave the loading screen once the hierarchy is in place, or once it is
/// known not to be coming (the map then runs empty until a reload).
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_settled() {
        return;
    }

    info!("→ Hierarchy settled, transitioning to Running state");
    rpc_interface.send_notification(
        "loading_complete",
        serde_json::json!({
            "hierarchy_loaded": loading_progress.hierarchy_loaded,
            "warnings": loading_progress.warning_count,
        }),
    );
    next_state.set(AppState::Running);
}
