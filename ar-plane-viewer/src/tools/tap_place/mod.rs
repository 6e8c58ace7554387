//! Tap-to-place tool: recognise taps, hit-test tracked surfaces, spawn
//! catalogue models at the nearest strike.

pub mod placement;
pub mod state;
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

pub struct TapPlacementPlugin;

impl Plugin for TapPlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<state::PlacementState>()
            .init_resource::<state::PlacedModels>()
            .add_event::<state::ScreenTap>()
            .add_systems(
                Update,
                (placement::recognise_taps, placement::place_model_on_tap)
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                ui::placement_shortcuts.run_if(in_state(AppState::Running)),
            );

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, ui::spawn_placement_panel).add_systems(
                Update,
                (ui::clear_button_interaction, ui::reflect_selected_model)
                    .run_if(in_state(AppState::Running)),
            );
        }
    }
}
