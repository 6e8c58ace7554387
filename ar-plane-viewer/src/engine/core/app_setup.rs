use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use constants::render_settings::{CLEAR_COLOUR, HUD_FONT_SIZE};

use crate::engine::assets::catalog::ModelCatalog;
use crate::engine::assets::library::{ModelLibrary, ModelSourceHandles, resolve_model_library};
use crate::engine::camera::observer_camera::{
    ObserverCamera, camera_controller, spawn_observer_camera,
};
use crate::engine::core::app_state::{
    AppState, SessionStatusText, begin_session, transition_to_session_ready,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::session_assets::{
    SessionAssetHandles, poll_catalog, poll_recording, start_loading,
};
use crate::engine::scene::feature_points::draw_feature_points;
use crate::engine::scene::plane_overlay::{
    PlaneOverlayIndex, attach_plane_overlays, evict_removed_overlays, init_overlay_assets,
    refresh_plane_overlays,
};
use crate::engine::systems::hud::{toggle_feature_points, update_session_status_text};
use crate::session::SessionPlugin;
use crate::session::feed::pump_session_feed;
use crate::session::nodes::maintain_anchor_nodes;
use crate::session::replay::{advance_session_clock, drive_scripted_session};
use crate::session::script::SessionRecording;
use crate::tools::tap_place::TapPlacementPlugin;

/// Create the application with the scripted session pipeline wired in.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(JsonAssetPlugin::<SessionRecording>::new(&["session.json"]))
        .add_plugins(JsonAssetPlugin::<ModelCatalog>::new(&["catalog.json"]))
        .add_plugins(SessionPlugin)
        .add_plugins(TapPlacementPlugin);

    app.insert_resource(ClearColor(CLEAR_COLOUR))
        .init_state::<AppState>()
        .init_resource::<LoadingProgress>()
        .init_resource::<SessionAssetHandles>()
        .init_resource::<ModelSourceHandles>()
        .init_resource::<ModelLibrary>()
        .init_resource::<PlaneOverlayIndex>()
        .init_resource::<ObserverCamera>()
        .add_systems(Startup, (setup, init_overlay_assets, start_loading))
        .add_systems(
            Update,
            (poll_recording, poll_catalog, transition_to_session_ready)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            begin_session.run_if(in_state(AppState::SessionReady)),
        )
        .add_systems(
            Update,
            (
                advance_session_clock,
                drive_scripted_session,
                pump_session_feed,
                maintain_anchor_nodes,
                attach_plane_overlays,
                refresh_plane_overlays,
                evict_removed_overlays,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                camera_controller,
                resolve_model_library,
                draw_feature_points,
                toggle_feature_points,
                update_session_status_text,
            )
                .run_if(in_state(AppState::Running)),
        );

    #[cfg(not(target_arch = "wasm32"))]
    app.add_systems(Update, crate::engine::systems::hud::fps_text_update_system);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Camera and HUD go up immediately. Lighting waits for the recording's
/// configuration to be adopted.
fn setup(mut commands: Commands, observer: Res<ObserverCamera>) {
    spawn_observer_camera(&mut commands, &observer);
    spawn_hud(&mut commands);
}

fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("tracking: initialising | surfaces: 0 | placed: 0"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(8.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                SessionStatusText,
            ));

            #[cfg(not(target_arch = "wasm32"))]
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.9, 0.7)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(8.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                crate::engine::core::app_state::FpsText,
            ));
        });
}
