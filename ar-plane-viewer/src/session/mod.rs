//! Session layer: the anchor data model, the provider feed, and scripted
//! replay of recorded captures.

pub mod anchor;
pub mod config;
pub mod feed;
pub mod nodes;
pub mod replay;
pub mod script;

use bevy::prelude::*;

/// Registers the events and resources every session consumer relies on.
/// The per-frame pipeline itself is registered by app setup, so frame
/// ordering stays declared in one place.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<anchor::AnchorEvent>()
            .init_resource::<anchor::TrackingPhase>()
            .init_resource::<config::SessionConfig>()
            .init_resource::<feed::SessionFeed>()
            .init_resource::<feed::FeatureCloud>()
            .init_resource::<replay::SessionClock>()
            .init_resource::<replay::ReplayCursor>()
            .init_resource::<nodes::AnchorNodeIndex>()
            .init_resource::<nodes::PlaneRegistry>();
    }
}
