use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw hierarchy snapshot as a Bevy asset. Kept as untyped JSON so the
/// builder can skip bad entries instead of failing the whole load.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchySnapshot(pub serde_json::Value);
