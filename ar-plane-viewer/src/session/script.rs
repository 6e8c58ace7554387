use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::anchor::{
    AnchorEvent, AnchorId, FaceAnchor, ImageAnchor, PlaneAlignment, PlaneAnchor, TrackedAnchor,
    TrackingPhase,
};
use crate::session::config::{PlaneDetection, SessionConfig};
use crate::session::feed::SessionMessage;

/// A capture of one session. Entries are ordered by timestamp and are
/// replayed through the feed as session time passes them.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    #[serde(default)]
    pub config: SessionConfig,
    pub entries: Vec<RecordingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingEntry {
    /// Seconds since the session started.
    pub at: f32,
    #[serde(flatten)]
    pub event: RecordingEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingEvent {
    Tracking(TrackingPhase),
    PlaneAdded(PlaneRecord),
    PlaneUpdated(PlaneRecord),
    ImageAdded(ImageRecord),
    FaceAdded(FaceRecord),
    AnchorRemoved(u32),
    FeaturePoints(Vec<[f32; 3]>),
}

/// Serialized form of a plane anchor. Horizontal anchor frames are gravity
/// aligned, so most captures only ever fill `position` and `extent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRecord {
    pub id: u32,
    pub position: [f32; 3],
    #[serde(default)]
    pub euler_degrees: [f32; 3],
    #[serde(default)]
    pub center: [f32; 3],
    pub extent: [f32; 2],
    #[serde(default)]
    pub alignment: PlaneAlignment,
}

impl PlaneRecord {
    pub fn to_anchor(self) -> PlaneAnchor {
        let [x, y, z] = self.euler_degrees;
        PlaneAnchor {
            id: AnchorId(self.id),
            pose: Transform::from_translation(Vec3::from_array(self.position)).with_rotation(
                Quat::from_euler(
                    EulerRot::XYZ,
                    x.to_radians(),
                    y.to_radians(),
                    z.to_radians(),
                ),
            ),
            center: Vec3::from_array(self.center),
            extent: Vec2::from_array(self.extent),
            alignment: self.alignment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: u32,
    pub position: [f32; 3],
    pub name: String,
    pub physical_size: [f32; 2],
}

impl ImageRecord {
    pub fn to_anchor(&self) -> ImageAnchor {
        ImageAnchor {
            id: AnchorId(self.id),
            pose: Transform::from_translation(Vec3::from_array(self.position)),
            image_name: self.name.clone(),
            physical_size: Vec2::from_array(self.physical_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: u32,
    pub position: [f32; 3],
}

impl FaceRecord {
    pub fn to_anchor(self) -> FaceAnchor {
        FaceAnchor {
            id: AnchorId(self.id),
            pose: Transform::from_translation(Vec3::from_array(self.position)),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordingError {
    #[error("entry {index}: timestamp is not finite")]
    InvalidTimestamp { index: usize },
    #[error("entry {index}: timestamp {at} precedes {previous}")]
    OutOfOrder { index: usize, at: f32, previous: f32 },
    #[error("entry {index}: unknown anchor {id}")]
    UnknownAnchor { index: usize, id: u32 },
    #[error("entry {index}: anchor {id} is already live")]
    DuplicateAnchor { index: usize, id: u32 },
    #[error("entry {index}: negative extent")]
    InvalidExtent { index: usize },
}

impl SessionRecording {
    /// Checks the invariants replay relies on: monotonic timestamps, and a
    /// lifecycle per anchor of add, zero or more updates, optional remove.
    pub fn validate(&self) -> Result<(), RecordingError> {
        let mut previous = 0.0_f32;
        let mut live: HashSet<u32> = HashSet::new();

        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.at.is_finite() {
                return Err(RecordingError::InvalidTimestamp { index });
            }
            if entry.at < previous {
                return Err(RecordingError::OutOfOrder {
                    index,
                    at: entry.at,
                    previous,
                });
            }
            previous = entry.at;

            match &entry.event {
                RecordingEvent::PlaneAdded(record) => {
                    check_extent(record, index)?;
                    if !live.insert(record.id) {
                        return Err(RecordingError::DuplicateAnchor {
                            index,
                            id: record.id,
                        });
                    }
                }
                RecordingEvent::PlaneUpdated(record) => {
                    check_extent(record, index)?;
                    if !live.contains(&record.id) {
                        return Err(RecordingError::UnknownAnchor {
                            index,
                            id: record.id,
                        });
                    }
                }
                RecordingEvent::ImageAdded(record) => {
                    if !live.insert(record.id) {
                        return Err(RecordingError::DuplicateAnchor {
                            index,
                            id: record.id,
                        });
                    }
                }
                RecordingEvent::FaceAdded(record) => {
                    if !live.insert(record.id) {
                        return Err(RecordingError::DuplicateAnchor {
                            index,
                            id: record.id,
                        });
                    }
                }
                RecordingEvent::AnchorRemoved(id) => {
                    if !live.remove(id) {
                        return Err(RecordingError::UnknownAnchor { index, id: *id });
                    }
                }
                RecordingEvent::Tracking(_) | RecordingEvent::FeaturePoints(_) => {}
            }
        }

        Ok(())
    }

    pub fn duration(&self) -> f32 {
        self.entries.last().map(|entry| entry.at).unwrap_or(0.0)
    }
}

fn check_extent(record: &PlaneRecord, index: usize) -> Result<(), RecordingError> {
    if record.extent[0] < 0.0 || record.extent[1] < 0.0 {
        return Err(RecordingError::InvalidExtent { index });
    }
    Ok(())
}

impl RecordingEvent {
    /// The feed message this entry produces under the given detection mode.
    /// Plane events for alignments the capture configuration never reported
    /// yield `None`. Removals always pass through, since a bare identity
    /// carries no alignment; downstream consumers skip unknown ids anyway.
    pub fn to_message(&self, detection: PlaneDetection) -> Option<SessionMessage> {
        match self {
            RecordingEvent::Tracking(phase) => Some(SessionMessage::Tracking(*phase)),
            RecordingEvent::PlaneAdded(record) => detection
                .accepts(record.alignment)
                .then(|| SessionMessage::Anchor(AnchorEvent::Added(plane(record)))),
            RecordingEvent::PlaneUpdated(record) => detection
                .accepts(record.alignment)
                .then(|| SessionMessage::Anchor(AnchorEvent::Updated(plane(record)))),
            RecordingEvent::ImageAdded(record) => Some(SessionMessage::Anchor(
                AnchorEvent::Added(TrackedAnchor::Image(record.to_anchor())),
            )),
            RecordingEvent::FaceAdded(record) => Some(SessionMessage::Anchor(
                AnchorEvent::Added(TrackedAnchor::Face(record.to_anchor())),
            )),
            RecordingEvent::AnchorRemoved(id) => {
                Some(SessionMessage::Anchor(AnchorEvent::Removed(AnchorId(*id))))
            }
            RecordingEvent::FeaturePoints(points) => Some(SessionMessage::FeaturePoints(
                points.iter().copied().map(Vec3::from_array).collect(),
            )),
        }
    }
}

fn plane(record: &PlaneRecord) -> TrackedAnchor {
    TrackedAnchor::Plane(record.to_anchor())
}
