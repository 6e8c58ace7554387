use bevy::prelude::*;

use constants::render_settings::HUD_FONT_SIZE;

use crate::engine::assets::library::ModelLibrary;
use crate::tools::tap_place::placement::despawn_placed_models;
use crate::tools::tap_place::state::{PlacedModel, PlacedModels, PlacementState};

#[derive(Component)]
pub struct PlacementPanel;

#[derive(Component)]
pub struct ClearPlacedButton;

#[derive(Component)]
pub struct SelectedModelText;

/// Small native panel in the lower right: the active model and a clear
/// button.
pub fn spawn_placement_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                bottom: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            PlacementPanel,
            Name::new("placement_panel"),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("model: -"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                SelectedModelText,
            ));
            panel
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.22)),
                    ClearPlacedButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("clear placed"),
                        TextFont {
                            font_size: HUD_FONT_SIZE,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn clear_button_interaction(
    mut interactions: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ClearPlacedButton>),
    >,
    mut commands: Commands,
    instances: Query<Entity, With<PlacedModel>>,
    mut placed: ResMut<PlacedModels>,
) {
    for (interaction, mut background) in &mut interactions {
        match *interaction {
            Interaction::Pressed => {
                despawn_placed_models(&mut commands, &instances, &mut placed);
                *background = BackgroundColor(Color::srgb(0.45, 0.18, 0.18));
            }
            Interaction::Hovered => {
                *background = BackgroundColor(Color::srgb(0.28, 0.28, 0.3));
            }
            Interaction::None => {
                *background = BackgroundColor(Color::srgb(0.2, 0.2, 0.22));
            }
        }
    }
}

/// Shows the model the next tap will spawn, selection or fallback.
pub fn reflect_selected_model(
    state: Res<PlacementState>,
    library: Res<ModelLibrary>,
    mut labels: Query<&mut Text, With<SelectedModelText>>,
) {
    let name = state
        .selected_model
        .as_deref()
        .or_else(|| library.first().map(|model| model.name.as_str()))
        .unwrap_or("-");
    for mut text in &mut labels {
        text.0 = format!("model: {name}");
    }
}

/// M cycles through resolved models, C clears everything placed.
pub fn placement_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    library: Res<ModelLibrary>,
    mut state: ResMut<PlacementState>,
    mut commands: Commands,
    instances: Query<Entity, With<PlacedModel>>,
    mut placed: ResMut<PlacedModels>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) && !library.is_empty() {
        let names: Vec<&str> = library.names().collect();
        let next = match state.selected_model.as_deref() {
            Some(current) => match names.iter().position(|name| *name == current) {
                Some(index) => names[(index + 1) % names.len()],
                None => names[0],
            },
            None => names[0],
        };
        state.selected_model = Some(next.to_owned());
        info!("selected model '{next}'");
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        despawn_placed_models(&mut commands, &instances, &mut placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::library::PlaceableModel;

    fn shortcut_app() -> App {
        let mut app = App::new();
        let mut library = ModelLibrary::default();
        for name in ["biplane", "crate"] {
            library.insert(PlaceableModel {
                name: name.to_owned(),
                scene: Handle::default(),
                scale: 1.0,
            });
        }
        app.insert_resource(library)
            .init_resource::<PlacementState>()
            .init_resource::<PlacedModels>()
            .insert_resource(ButtonInput::<KeyCode>::default())
            .add_systems(Update, placement_shortcuts);
        app
    }

    fn tap_key(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }

    fn selected(app: &App) -> Option<String> {
        app.world()
            .resource::<PlacementState>()
            .selected_model
            .clone()
    }

    #[test]
    fn model_key_cycles_through_the_library_and_wraps() {
        let mut app = shortcut_app();
        assert_eq!(selected(&app), None);

        tap_key(&mut app, KeyCode::KeyM);
        assert_eq!(selected(&app).as_deref(), Some("biplane"));

        tap_key(&mut app, KeyCode::KeyM);
        assert_eq!(selected(&app).as_deref(), Some("crate"));

        tap_key(&mut app, KeyCode::KeyM);
        assert_eq!(selected(&app).as_deref(), Some("biplane"));
    }

    #[test]
    fn clear_key_removes_instances_and_history() {
        let mut app = shortcut_app();
        app.world_mut().spawn((
            PlacedModel {
                model: "biplane".to_owned(),
            },
            Transform::default(),
        ));
        app.world_mut()
            .resource_mut::<PlacedModels>()
            .records
            .push(crate::tools::tap_place::state::PlacementRecord {
                model: "biplane".to_owned(),
                position: Vec3::ZERO,
            });

        tap_key(&mut app, KeyCode::KeyC);

        let remaining = app
            .world_mut()
            .query_filtered::<Entity, With<PlacedModel>>()
            .iter(app.world())
            .count();
        assert_eq!(remaining, 0);
        assert!(app.world().resource::<PlacedModels>().records.is_empty());
    }
}
