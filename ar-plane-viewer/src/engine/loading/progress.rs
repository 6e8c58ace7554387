use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub recording_loaded: bool,
    pub recording_valid: bool,
    pub catalog_loaded: bool,
}
