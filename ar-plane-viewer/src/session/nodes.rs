use std::collections::HashMap;

use bevy::prelude::*;

use crate::session::anchor::{AnchorEvent, AnchorId, PlaneAnchor};

/// Scene node mirroring one tracked anchor. Children of the node, such as
/// a surface overlay, follow the anchor pose for free.
#[derive(Component, Debug)]
pub struct AnchorNode {
    pub id: AnchorId,
}

/// Anchor identity to scene node, for every anchor kind.
#[derive(Resource, Debug, Default)]
pub struct AnchorNodeIndex {
    nodes: HashMap<AnchorId, Entity>,
}

impl AnchorNodeIndex {
    pub fn get(&self, id: AnchorId) -> Option<Entity> {
        self.nodes.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// World-space description of one tracked surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    pub translation: Vec3,
    pub rotation: Quat,
    /// Half width along local X, half depth along local Z.
    pub half_extent: Vec2,
}

impl PlaneSurface {
    pub fn of(anchor: &PlaneAnchor) -> Self {
        Self {
            translation: anchor.surface_center(),
            rotation: anchor.pose.rotation,
            half_extent: anchor.extent * 0.5,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Live plane surfaces, the set every hit test runs against.
#[derive(Resource, Debug, Default)]
pub struct PlaneRegistry {
    surfaces: HashMap<AnchorId, PlaneSurface>,
}

impl PlaneRegistry {
    pub fn get(&self, id: AnchorId) -> Option<&PlaneSurface> {
        self.surfaces.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnchorId, &PlaneSurface)> {
        self.surfaces.iter().map(|(id, surface)| (*id, surface))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    #[cfg(test)]
    pub fn insert(&mut self, id: AnchorId, surface: PlaneSurface) {
        self.surfaces.insert(id, surface);
    }

    fn upsert(&mut self, anchor: &PlaneAnchor) {
        self.surfaces.insert(anchor.id, PlaneSurface::of(anchor));
    }

    fn remove(&mut self, id: AnchorId) -> Option<PlaneSurface> {
        self.surfaces.remove(&id)
    }
}

/// Keeps one scene node per live anchor, and the plane registry in step
/// with the event stream. Updates for anchors this session never added are
/// stale chatter and are skipped without side effects.
pub fn maintain_anchor_nodes(
    mut events: EventReader<AnchorEvent>,
    mut commands: Commands,
    mut index: ResMut<AnchorNodeIndex>,
    mut registry: ResMut<PlaneRegistry>,
    mut nodes: Query<&mut Transform, With<AnchorNode>>,
) {
    for event in events.read() {
        match event {
            AnchorEvent::Added(anchor) if index.get(anchor.id()).is_none() => {
                let entity = commands
                    .spawn((
                        AnchorNode { id: anchor.id() },
                        anchor.pose(),
                        Visibility::default(),
                        Name::new(format!("anchor_{}", anchor.id())),
                    ))
                    .id();
                index.nodes.insert(anchor.id(), entity);
                if let Some(plane) = anchor.as_plane() {
                    registry.upsert(plane);
                }
                debug!("anchor {} added ({})", anchor.id(), anchor.kind());
            }
            // A session may re-announce a live anchor; both cases converge
            // on the same node state.
            AnchorEvent::Added(anchor) | AnchorEvent::Updated(anchor) => {
                let Some(entity) = index.get(anchor.id()) else {
                    continue;
                };
                if let Ok(mut transform) = nodes.get_mut(entity) {
                    *transform = anchor.pose();
                } else {
                    // Node spawned earlier this frame and not yet flushed.
                    commands.entity(entity).insert(anchor.pose());
                }
                if let Some(plane) = anchor.as_plane() {
                    registry.upsert(plane);
                }
            }
            AnchorEvent::Removed(id) => {
                let Some(entity) = index.nodes.remove(id) else {
                    continue;
                };
                registry.remove(*id);
                commands.entity(entity).despawn();
                debug!("anchor {id} removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::anchor::{PlaneAlignment, TrackedAnchor};

    fn plane(id: u32, extent: Vec2) -> TrackedAnchor {
        TrackedAnchor::Plane(PlaneAnchor {
            id: AnchorId(id),
            pose: Transform::from_xyz(1.0, 0.0, -0.5),
            center: Vec3::ZERO,
            extent,
            alignment: PlaneAlignment::Horizontal,
        })
    }

    fn node_app() -> App {
        let mut app = App::new();
        app.add_event::<AnchorEvent>()
            .init_resource::<AnchorNodeIndex>()
            .init_resource::<PlaneRegistry>()
            .add_systems(Update, maintain_anchor_nodes);
        app
    }

    fn node_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<AnchorNode>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn added_anchor_gets_a_node_and_a_registry_entry() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::new(0.4, 0.3))));
        app.update();

        assert_eq!(node_count(&mut app), 1);
        assert_eq!(app.world().resource::<AnchorNodeIndex>().len(), 1);

        let registry = app.world().resource::<PlaneRegistry>();
        let surface = registry.get(AnchorId(1)).unwrap();
        assert_eq!(surface.translation, Vec3::new(1.0, 0.0, -0.5));
        assert_eq!(surface.half_extent, Vec2::new(0.2, 0.15));
        assert_eq!(surface.normal(), Vec3::Y);
    }

    #[test]
    fn updates_move_the_node_and_refresh_the_registry() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::new(0.4, 0.3))));
        app.update();

        let moved = TrackedAnchor::Plane(PlaneAnchor {
            id: AnchorId(1),
            pose: Transform::from_xyz(1.25, 0.0, -0.75),
            center: Vec3::new(0.25, 0.0, 0.0),
            extent: Vec2::new(0.8, 0.6),
            alignment: PlaneAlignment::Horizontal,
        });
        app.world_mut().send_event(AnchorEvent::Updated(moved));
        app.update();

        assert_eq!(node_count(&mut app), 1);
        let entity = app
            .world()
            .resource::<AnchorNodeIndex>()
            .get(AnchorId(1))
            .unwrap();
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.25, 0.0, -0.75));

        let registry = app.world().resource::<PlaneRegistry>();
        let surface = registry.get(AnchorId(1)).unwrap();
        assert_eq!(surface.translation, Vec3::new(1.5, 0.0, -0.75));
        assert_eq!(surface.half_extent, Vec2::new(0.4, 0.3));
    }

    #[test]
    fn updates_for_unknown_anchors_change_nothing() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Updated(plane(9, Vec2::splat(1.0))));
        app.update();

        assert_eq!(node_count(&mut app), 0);
        assert!(app.world().resource::<AnchorNodeIndex>().is_empty());
        assert!(app.world().resource::<PlaneRegistry>().is_empty());
    }

    #[test]
    fn removal_despawns_the_node_and_evicts_the_surface() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::splat(0.5))));
        app.update();
        app.world_mut().send_event(AnchorEvent::Removed(AnchorId(1)));
        app.update();

        assert_eq!(node_count(&mut app), 0);
        assert!(app.world().resource::<AnchorNodeIndex>().is_empty());
        assert!(app.world().resource::<PlaneRegistry>().is_empty());

        // Stale updates after removal stay no-ops.
        app.world_mut()
            .send_event(AnchorEvent::Updated(plane(1, Vec2::splat(2.0))));
        app.update();
        assert_eq!(node_count(&mut app), 0);
    }

    #[test]
    fn re_announced_anchors_do_not_duplicate_nodes() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::new(0.4, 0.3))));
        app.update();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::new(1.0, 1.0))));
        app.update();

        assert_eq!(node_count(&mut app), 1);
        let registry = app.world().resource::<PlaneRegistry>();
        assert_eq!(
            registry.get(AnchorId(1)).unwrap().half_extent,
            Vec2::splat(0.5)
        );
    }

    #[test]
    fn add_and_update_in_one_frame_converge() {
        let mut app = node_app();
        app.world_mut()
            .send_event(AnchorEvent::Added(plane(1, Vec2::splat(1.0))));
        let moved = TrackedAnchor::Plane(PlaneAnchor {
            id: AnchorId(1),
            pose: Transform::from_xyz(2.0, 0.0, 0.0),
            center: Vec3::ZERO,
            extent: Vec2::new(2.0, 3.0),
            alignment: PlaneAlignment::Horizontal,
        });
        app.world_mut().send_event(AnchorEvent::Updated(moved));
        app.update();

        assert_eq!(node_count(&mut app), 1);
        let entity = app
            .world()
            .resource::<AnchorNodeIndex>()
            .get(AnchorId(1))
            .unwrap();
        assert_eq!(
            app.world().get::<Transform>(entity).unwrap().translation,
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(
            app.world()
                .resource::<PlaneRegistry>()
                .get(AnchorId(1))
                .unwrap()
                .half_extent,
            Vec2::new(1.0, 1.5)
        );
    }
}
