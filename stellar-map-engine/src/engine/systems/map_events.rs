use bevy::prelude::*;

use crate::engine::session::{MapEvent, StellarMapSession};
use crate::rpc::web_rpc::WebRpcInterface;

/// Forward session notifications to the host page.
pub fn publish_map_events(
    mut session: ResMut<StellarMapSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in session.drain_events() {
        match &event {
            MapEvent::CameraStateChanged { from, to } => debug!("Camera state {} -> {}", from, to),
            MapEvent::NodeClick { node } => info!("Node clicked: {}", node.id),
            MapEvent::NodeHover { node, .. } => {
                debug!("Hover: {:?}", node.as_ref().map(|n| n.id.as_str()))
            }
        }

        match serde_json::to_value(&event) {
            Ok(params) => rpc_interface.send_notification(event.method(), params),
            Err(err) => error!("Failed to serialise {} event: {}", event.method(), err),
        }
    }
}
