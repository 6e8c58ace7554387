use bevy::prelude::*;

/// Tap-to-place tool state: which catalogue model the next tap spawns.
/// `None` falls back to the first resolved model.
#[derive(Resource, Debug, Default)]
pub struct PlacementState {
    pub selected_model: Option<String>,
}

/// One object placed during this run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub model: String,
    pub position: Vec3,
}

/// Every placement so far, in tap order.
#[derive(Resource, Debug, Default)]
pub struct PlacedModels {
    pub records: Vec<PlacementRecord>,
}

/// Marker for one spawned model instance.
#[derive(Component, Debug)]
pub struct PlacedModel {
    pub model: String,
}

/// A confirmed tap or click at a viewport position.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScreenTap {
    pub position: Vec2,
}
