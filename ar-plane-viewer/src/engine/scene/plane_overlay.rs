use std::collections::HashMap;

use bevy::prelude::*;

use constants::overlay::{SURFACE_OVERLAY_COLOUR, SURFACE_OVERLAY_TILT_RADIANS};

use crate::session::anchor::{AnchorEvent, AnchorId, PlaneAnchor};
use crate::session::nodes::AnchorNodeIndex;

/// Translucent rectangle visualising one tracked surface.
#[derive(Component, Debug)]
pub struct PlaneOverlay {
    pub anchor: AnchorId,
}

/// Anchor identity to overlay entity. At most one overlay exists per
/// anchor.
#[derive(Resource, Debug, Default)]
pub struct PlaneOverlayIndex {
    overlays: HashMap<AnchorId, Entity>,
}

impl PlaneOverlayIndex {
    pub fn get(&self, id: AnchorId) -> Option<Entity> {
        self.overlays.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

/// Geometry and material shared by every overlay. The mesh is a unit
/// rectangle and per-surface extent comes from the transform scale, so a
/// refit never rebuilds the mesh.
#[derive(Resource, Debug)]
pub struct OverlayAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn init_overlay_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Rectangle::new(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: SURFACE_OVERLAY_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    commands.insert_resource(OverlayAssets { mesh, material });
}

/// Local transform of an overlay under its anchor node: centred on the
/// surface, laid flat, sized through scale.
fn overlay_transform(plane: &PlaneAnchor) -> Transform {
    Transform {
        translation: plane.center,
        rotation: Quat::from_rotation_x(SURFACE_OVERLAY_TILT_RADIANS),
        scale: Vec3::new(plane.extent.x, plane.extent.y, 1.0),
    }
}

fn refit(
    overlays: &mut Query<&mut Transform, With<PlaneOverlay>>,
    entity: Entity,
    plane: &PlaneAnchor,
) {
    if let Ok(mut transform) = overlays.get_mut(entity) {
        *transform = overlay_transform(plane);
    }
}

/// Gives each newly added plane anchor an overlay child under its node.
/// Re-announced anchors re-fit the overlay they already have, so
/// rectangles never stack. Without a scene node or the shared overlay
/// assets there is nothing to attach to, and the event is skipped.
pub fn attach_plane_overlays(
    mut events: EventReader<AnchorEvent>,
    mut commands: Commands,
    assets: Option<Res<OverlayAssets>>,
    node_index: Res<AnchorNodeIndex>,
    mut overlay_index: ResMut<PlaneOverlayIndex>,
    mut overlays: Query<&mut Transform, With<PlaneOverlay>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for event in events.read() {
        let AnchorEvent::Added(anchor) = event else {
            continue;
        };
        let Some(plane) = anchor.as_plane() else {
            continue;
        };
        if let Some(existing) = overlay_index.get(plane.id) {
            refit(&mut overlays, existing, plane);
            continue;
        }
        let Some(node) = node_index.get(plane.id) else {
            continue;
        };

        let mut overlay = Entity::PLACEHOLDER;
        commands.entity(node).with_children(|children| {
            overlay = children
                .spawn((
                    PlaneOverlay { anchor: plane.id },
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(assets.material.clone()),
                    overlay_transform(plane),
                    Name::new(format!("overlay_{}", plane.id)),
                ))
                .id();
        });
        overlay_index.overlays.insert(plane.id, overlay);
        debug!(
            "overlay attached for anchor {} ({} x {})",
            plane.id, plane.extent.x, plane.extent.y
        );
    }
}

/// Re-fits overlays as the session refines surface centre and extent.
/// Updates for anchors without an overlay are skipped.
pub fn refresh_plane_overlays(
    mut events: EventReader<AnchorEvent>,
    overlay_index: Res<PlaneOverlayIndex>,
    mut overlays: Query<&mut Transform, With<PlaneOverlay>>,
) {
    for event in events.read() {
        let AnchorEvent::Updated(anchor) = event else {
            continue;
        };
        let Some(plane) = anchor.as_plane() else {
            continue;
        };
        let Some(entity) = overlay_index.get(plane.id) else {
            continue;
        };
        refit(&mut overlays, entity, plane);
    }
}

/// Drops index entries for removed anchors. The overlay entity itself
/// dies with its parent node.
pub fn evict_removed_overlays(
    mut events: EventReader<AnchorEvent>,
    mut overlay_index: ResMut<PlaneOverlayIndex>,
) {
    for event in events.read() {
        if let AnchorEvent::Removed(id) = event {
            overlay_index.overlays.remove(id);
        }
    }
}
