use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub hierarchy_requested: bool,
    pub hierarchy_loaded: bool,
    pub hierarchy_failed: bool,
    pub warning_count: usize,
}

impl LoadingProgress {
    pub fn is_settled(&self) -> bool {
        self.hierarchy_requested && (self.hierarchy_loaded || self.hierarchy_failed)
    }
}
