//! Asset loading for the hierarchy snapshot.
//!
//! Requests the snapshot at startup, hands it to the session once it
//! arrives and reloads it whenever the file changes on disk.

/// Hierarchy snapshot requests, first load and hot reload.
pub mod hierarchy_loader;

/// Loading progress consulted by the `Loading -> Running` transition.
pub mod progress;
