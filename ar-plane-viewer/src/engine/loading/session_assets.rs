use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use constants::asset_paths;

use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::assets::library::ModelSourceHandles;
use crate::engine::loading::progress::LoadingProgress;
use crate::session::script::SessionRecording;

/// Handles for the two JSON documents the app boots from.
#[derive(Resource, Default)]
pub struct SessionAssetHandles {
    recording: Option<Handle<SessionRecording>>,
    catalog: Option<Handle<ModelCatalog>>,
}

// Start the loading process.
pub fn start_loading(mut handles: ResMut<SessionAssetHandles>, asset_server: Res<AssetServer>) {
    handles.recording = Some(asset_server.load(asset_paths::SESSION_RECORDING));
    handles.catalog = Some(asset_server.load(asset_paths::MODEL_CATALOG));
}

/// Adopts the recording once parsed. The capture configuration it carries
/// replaces the default session configuration. An invalid or unreadable
/// recording is dropped, leaving the app to come up with an idle session
/// rather than fail outright.
pub fn poll_recording(
    mut progress: ResMut<LoadingProgress>,
    handles: Res<SessionAssetHandles>,
    recordings: Res<Assets<SessionRecording>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if progress.recording_loaded {
        return;
    }
    let Some(handle) = &handles.recording else {
        return;
    };
    if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("session recording failed to load: {error}");
        progress.recording_loaded = true;
        return;
    }
    let Some(recording) = recordings.get(handle) else {
        return;
    };

    match recording.validate() {
        Ok(()) => {
            info!(
                "session recording loaded: {} entries over {:.1}s",
                recording.entries.len(),
                recording.duration()
            );
            commands.insert_resource(recording.config);
            commands.insert_resource(recording.clone());
            progress.recording_valid = true;
        }
        Err(error) => {
            warn!("session recording rejected: {error}");
        }
    }
    progress.recording_loaded = true;
}

/// Adopts the catalogue once parsed and starts each model's glTF load.
pub fn poll_catalog(
    mut progress: ResMut<LoadingProgress>,
    handles: Res<SessionAssetHandles>,
    catalogs: Res<Assets<ModelCatalog>>,
    mut sources: ResMut<ModelSourceHandles>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if progress.catalog_loaded {
        return;
    }
    let Some(handle) = &handles.catalog else {
        return;
    };
    if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("model catalogue failed to load: {error}");
        progress.catalog_loaded = true;
        return;
    }
    let Some(catalog) = catalogs.get(handle) else {
        return;
    };

    for entry in &catalog.models {
        let gltf: Handle<Gltf> = asset_server.load(entry.source.as_str());
        sources.sources.insert(entry.name.clone(), gltf);
    }
    info!("model catalogue loaded: {} models", catalog.models.len());
    commands.insert_resource(catalog.clone());
    progress.catalog_loaded = true;
}
