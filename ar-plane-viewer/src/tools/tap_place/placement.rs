use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::assets::library::ModelLibrary;
use crate::session::nodes::PlaneRegistry;
use crate::tools::tap_place::hit_test::{surface_hits, SurfaceHit};
use crate::tools::tap_place::state::{
    PlacedModel, PlacedModels, PlacementRecord, PlacementState, ScreenTap,
};

/// Turns pointer presses and finished touches into screen taps. A touch
/// counts on release, which is when a tap gesture is actually recognised.
pub fn recognise_taps(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut taps: EventWriter<ScreenTap>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        if let Ok(window) = windows.single() {
            if let Some(position) = window.cursor_position() {
                taps.write(ScreenTap { position });
            }
        }
    }
    for touch in touches.iter_just_released() {
        taps.write(ScreenTap {
            position: touch.position(),
        });
    }
}

/// Spawns the chosen model where each tap's ray strikes the nearest
/// tracked surface. A tap whose ray clears every surface does nothing,
/// as does a tap thrown before any model has resolved.
pub fn place_model_on_tap(
    mut taps: EventReader<ScreenTap>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    registry: Res<PlaneRegistry>,
    library: Res<ModelLibrary>,
    state: Res<PlacementState>,
    mut placed: ResMut<PlacedModels>,
    mut commands: Commands,
) {
    for tap in taps.read() {
        let Ok((camera, camera_transform)) = cameras.single() else {
            return;
        };
        let Some(ray) = camera.viewport_to_world(camera_transform, tap.position).ok() else {
            continue;
        };
        let hits = surface_hits(&registry, ray.origin, *ray.direction);
        let Some(hit) = hits.first() else {
            continue;
        };
        place_at_hit(&mut commands, &library, &state, &mut placed, hit);
    }
}

/// Spawns the selected model at a confirmed surface hit. Falls back to the
/// first resolved model when nothing is selected, and refuses quietly when
/// the library is still empty.
pub fn place_at_hit(
    commands: &mut Commands,
    library: &ModelLibrary,
    state: &PlacementState,
    placed: &mut PlacedModels,
    hit: &SurfaceHit,
) -> bool {
    let model = state
        .selected_model
        .as_deref()
        .and_then(|name| library.get(name))
        .or_else(|| library.first());
    let Some(model) = model else {
        return false;
    };

    let position = hit.translation();
    commands.spawn((
        SceneRoot(model.scene.clone()),
        Transform::from_translation(position).with_scale(Vec3::splat(model.scale)),
        PlacedModel {
            model: model.name.clone(),
        },
        Name::new(format!("placed_{}", model.name)),
    ));
    placed.records.push(PlacementRecord {
        model: model.name.clone(),
        position,
    });
    debug!(
        "placed '{}' at {:?} on anchor {}",
        model.name, position, hit.anchor
    );
    true
}

/// Removes every placed instance and forgets the placement history.
pub fn despawn_placed_models(
    commands: &mut Commands,
    instances: &Query<Entity, With<PlacedModel>>,
    placed: &mut PlacedModels,
) {
    for entity in instances.iter() {
        commands.entity(entity).despawn();
    }
    if !placed.records.is_empty() {
        info!("cleared {} placed models", placed.records.len());
    }
    placed.records.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::library::PlaceableModel;
    use crate::session::anchor::AnchorId;
    use crate::session::nodes::PlaneSurface;
    use bevy::ecs::world::CommandQueue;

    fn library_with(names: &[(&str, f32)]) -> ModelLibrary {
        let mut library = ModelLibrary::default();
        for (name, scale) in names {
            library.insert(PlaceableModel {
                name: (*name).to_owned(),
                scene: Handle::default(),
                scale: *scale,
            });
        }
        library
    }

    fn hit_at(position: Vec3) -> SurfaceHit {
        SurfaceHit {
            anchor: AnchorId(1),
            transform: Transform::from_translation(position),
            distance: 1.0,
        }
    }

    fn apply_placement(
        world: &mut World,
        library: &ModelLibrary,
        state: &PlacementState,
        placed: &mut PlacedModels,
        hit: &SurfaceHit,
    ) -> bool {
        let mut queue = CommandQueue::default();
        let mut commands = Commands::new(&mut queue, world);
        let spawned = place_at_hit(&mut commands, library, state, placed, hit);
        queue.apply(world);
        spawned
    }

    fn placed_positions(world: &mut World) -> Vec<Vec3> {
        world
            .query_filtered::<&Transform, With<PlacedModel>>()
            .iter(world)
            .map(|transform| transform.translation)
            .collect()
    }

    #[test]
    fn a_hit_spawns_one_model_at_the_hit_point() {
        let mut world = World::new();
        let library = library_with(&[("biplane", 1.0)]);
        let state = PlacementState::default();
        let mut placed = PlacedModels::default();

        let spawned = apply_placement(
            &mut world,
            &library,
            &state,
            &mut placed,
            &hit_at(Vec3::new(1.0, 0.0, -0.5)),
        );

        assert!(spawned);
        assert_eq!(placed_positions(&mut world), vec![Vec3::new(1.0, 0.0, -0.5)]);
        assert_eq!(placed.records.len(), 1);
        assert_eq!(placed.records[0].model, "biplane");
        assert_eq!(placed.records[0].position, Vec3::new(1.0, 0.0, -0.5));
    }

    #[test]
    fn each_hit_places_another_instance() {
        let mut world = World::new();
        let library = library_with(&[("biplane", 1.0)]);
        let state = PlacementState::default();
        let mut placed = PlacedModels::default();

        apply_placement(&mut world, &library, &state, &mut placed, &hit_at(Vec3::ZERO));
        apply_placement(
            &mut world,
            &library,
            &state,
            &mut placed,
            &hit_at(Vec3::new(0.3, 0.0, 0.1)),
        );

        assert_eq!(placed_positions(&mut world).len(), 2);
        assert_eq!(placed.records.len(), 2);
    }

    #[test]
    fn an_empty_library_places_nothing() {
        let mut world = World::new();
        let library = ModelLibrary::default();
        let state = PlacementState::default();
        let mut placed = PlacedModels::default();

        let spawned =
            apply_placement(&mut world, &library, &state, &mut placed, &hit_at(Vec3::ZERO));

        assert!(!spawned);
        assert!(placed_positions(&mut world).is_empty());
        assert!(placed.records.is_empty());
    }

    #[test]
    fn selection_picks_the_model_and_unknown_names_fall_back() {
        let mut world = World::new();
        let library = library_with(&[("biplane", 1.0), ("crate", 0.5)]);
        let mut placed = PlacedModels::default();

        let state = PlacementState {
            selected_model: Some("crate".to_owned()),
        };
        apply_placement(&mut world, &library, &state, &mut placed, &hit_at(Vec3::ZERO));
        assert_eq!(placed.records[0].model, "crate");

        let state = PlacementState {
            selected_model: Some("teapot".to_owned()),
        };
        apply_placement(&mut world, &library, &state, &mut placed, &hit_at(Vec3::ZERO));
        assert_eq!(placed.records[1].model, "biplane");
    }

    #[test]
    fn scale_comes_from_the_catalogue_entry() {
        let mut world = World::new();
        let library = library_with(&[("crate", 0.5)]);
        let state = PlacementState::default();
        let mut placed = PlacedModels::default();

        apply_placement(&mut world, &library, &state, &mut placed, &hit_at(Vec3::ZERO));

        let scale = world
            .query_filtered::<&Transform, With<PlacedModel>>()
            .iter(&world)
            .next()
            .unwrap()
            .scale;
        assert_eq!(scale, Vec3::splat(0.5));
    }

    #[test]
    fn rays_that_miss_every_surface_place_nothing() {
        let mut registry = PlaneRegistry::default();
        registry.insert(
            AnchorId(1),
            PlaneSurface {
                translation: Vec3::new(1.0, 0.0, -0.5),
                rotation: Quat::IDENTITY,
                half_extent: Vec2::new(0.2, 0.15),
            },
        );

        // Past the extent on X: the hit list is empty, so placement never
        // runs and both the world and the history stay untouched.
        let hits = surface_hits(&registry, Vec3::new(3.0, 1.0, -0.5), Vec3::NEG_Y);
        assert!(hits.is_empty());
    }
}
