use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::lighting::spawn_scene_lighting;
use crate::session::config::SessionConfig;

/// Boot sequence. `Loading` resolves the JSON documents, `SessionReady`
/// finalises the scene against the adopted configuration, `Running` replays.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    SessionReady,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct SessionStatusText;

/// Leaves `Loading` once both boot documents have settled, accepted or
/// rejected alike.
pub fn transition_to_session_ready(
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if progress.recording_loaded && progress.catalog_loaded {
        info!("boot documents settled, preparing session");
        next_state.set(AppState::SessionReady);
    }
}

/// Stands the scene up under the recording's configuration and starts
/// the replay.
pub fn begin_session(
    mut commands: Commands,
    config: Res<SessionConfig>,
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    spawn_scene_lighting(&mut commands, &config);
    info!(
        "session running: plane detection {:?}, feature points {}, recording {}",
        config.plane_detection,
        if config.show_feature_points {
            "on"
        } else {
            "off"
        },
        if progress.recording_valid {
            "accepted"
        } else {
            "absent"
        },
    );
    next_state.set(AppState::Running);
}
