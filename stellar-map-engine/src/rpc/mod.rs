//! JSON-RPC 2.0 bridge between the map and its host page.
//!
//! The engine runs inside an iframe; the host drives it with `postMessage`
//! requests and listens for notifications.
//!
//! ```text
//! Host page  <──postMessage──>  Stellar map (iframe)
//!     │                                 │
//!     ├─ Request (with ID) ───────────> │ handle_rpc_request()
//!     │ <──────────── Response (ID) ────┤
//!     │ <──── Notification (no ID) ─────┤ node_hover, node_click, ...
//! ```
//!
//! Requests without an id are executed but never answered.
//!
//! ## Methods
//!
//! | method                | params                          |
//! |-----------------------|---------------------------------|
//! | `go_home`             |                                 |
//! | `exit_detail`         |                                 |
//! | `focus_on_node`       | `{ node_id }`                   |
//! | `focus_family`        | `{ family }`                    |
//! | `focus_constellation` | `{ family, constellation }`     |
//! | `focus_anchor`        |                                 |
//! | `set_speed_factor`    | `{ value }`                     |
//! | `search_groupings`    | `{ query }`                     |
//! | `list_nodes`          |                                 |
//! | `get_overview`        |                                 |
//! | `get_camera_state`    |                                 |
//! | `load_hierarchy`      | `{ hierarchy }`                 |
//!
//! ## Notifications
//!
//! - `node_hover`, `node_click`, `camera_state_changed`: map events
//! - `loading_complete`: first hierarchy settled
//! - `hierarchy_reloaded`: the snapshot asset changed on disk
//!
//! ## Error codes
//!
//! - `-32700`: parse error
//! - `-32601`: method not found
//! - `-32602`: invalid params or unknown entity
//! - `-32000`: request rejected in the current camera state
//! - `-32603`: internal error

pub mod web_rpc;
