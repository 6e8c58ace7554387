use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::core::app_state::{FpsText, SessionStatusText};
use crate::session::anchor::TrackingPhase;
use crate::session::config::SessionConfig;
use crate::session::nodes::PlaneRegistry;
use crate::tools::tap_place::state::PlacedModels;

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

/// One line of session truth: tracking phase, live surfaces, placements.
pub fn update_session_status_text(
    tracking: Res<TrackingPhase>,
    registry: Res<PlaneRegistry>,
    placed: Res<PlacedModels>,
    mut query: Query<&mut Text, With<SessionStatusText>>,
) {
    for mut text in &mut query {
        text.0 = format!(
            "tracking: {} | surfaces: {} | placed: {}",
            *tracking,
            registry.len(),
            placed.records.len()
        );
    }
}

/// F flips the feature point debug view at runtime.
pub fn toggle_feature_points(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut config: ResMut<SessionConfig>,
) {
    if keyboard.just_pressed(KeyCode::KeyF) {
        config.show_feature_points = !config.show_feature_points;
        info!(
            "feature points {}",
            if config.show_feature_points {
                "shown"
            } else {
                "hidden"
            }
        );
    }
}
