/// Hierarchy snapshot loaded at startup, relative to the asset root.
pub const HIERARCHY_ASSET_PATH: &str = "stellar_map/demo.hierarchy.json";

/// Extension the JSON asset loader claims for hierarchy snapshots.
pub const HIERARCHY_ASSET_EXTENSION: &str = "hierarchy.json";
