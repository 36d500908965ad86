//! Pointer and keyboard interaction with the map.
//!
//! ## Pointer
//!
//! Each frame the cursor ray is tested against the sphere of every body in
//! the registry. The nearest hit wins.
//! - Hovering a node emits `node_hover` (only when the hovered node changes).
//! - Left click on a node emits `node_click` and zooms in.
//! - Left click on a family or constellation moves the orbit focus there.
//!
//! ## Keyboard (native only)
//!
//! | key           | command          |
//! |---------------|------------------|
//! | `H`           | go home          |
//! | `Esc`         | exit detail      |
//! | `0`           | focus the anchor |
//! | `+` / `-`     | nudge speed      |
//!
//! WASM builds take navigation from the host page over RPC instead.

/// Ray-sphere picking of map bodies under the cursor.
pub mod picking;

/// Keyboard navigation commands.
pub mod map_commands;
