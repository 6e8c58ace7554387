use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use constants::session::FEATURE_CLOUD_CAPACITY;

use crate::session::anchor::{AnchorEvent, TrackingPhase};

/// One message a session provider hands to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    Anchor(AnchorEvent),
    Tracking(TrackingPhase),
    /// Replaces the sparse point cloud wholesale.
    FeaturePoints(Vec<Vec3>),
}

/// Thread-safe inbox between a session provider and the render loop.
/// Clones share one queue, so a provider half can live on another thread
/// while the drained half stays a resource.
#[derive(Resource, Clone, Default)]
pub struct SessionFeed {
    messages: Arc<Mutex<Vec<SessionMessage>>>,
}

impl SessionFeed {
    pub fn push(&self, message: SessionMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    pub fn push_anchor(&self, event: AnchorEvent) {
        self.push(SessionMessage::Anchor(event));
    }

    fn drain(&self) -> Vec<SessionMessage> {
        match self.messages.lock() {
            Ok(mut messages) => messages.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Latest sparse point cloud reported by the session.
#[derive(Resource, Debug, Clone, Default)]
pub struct FeatureCloud {
    pub points: Vec<Vec3>,
}

/// Drains the feed once per frame and fans each message out to the event
/// stream or resource it belongs to. Provider order is preserved, so an
/// add is always seen before updates to the same anchor.
pub fn pump_session_feed(
    feed: Res<SessionFeed>,
    mut anchor_events: EventWriter<AnchorEvent>,
    mut tracking: ResMut<TrackingPhase>,
    mut cloud: ResMut<FeatureCloud>,
) {
    for message in feed.drain() {
        match message {
            SessionMessage::Anchor(event) => {
                anchor_events.write(event);
            }
            SessionMessage::Tracking(phase) => {
                if *tracking != phase {
                    info!("tracking state changed to {phase}");
                    *tracking = phase;
                }
            }
            SessionMessage::FeaturePoints(mut points) => {
                points.truncate(FEATURE_CLOUD_CAPACITY);
                cloud.points = points;
            }
        }
    }
}
