use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stable identity the session assigns to a tracked anchor. Identities are
/// unique among live anchors; a removed identity may be assigned again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u32);

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneAlignment {
    #[default]
    Horizontal,
    Vertical,
}

/// A flat surface the session is tracking. `center` and `extent` are
/// expressed in the anchor's own frame; `pose` places that frame in the
/// world. Both are refined over time as the session sees more of the
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    pub pose: Transform,
    pub center: Vec3,
    /// Width along local X and depth along local Z.
    pub extent: Vec2,
    pub alignment: PlaneAlignment,
}

impl PlaneAnchor {
    /// World-space centre of the tracked surface.
    pub fn surface_center(&self) -> Vec3 {
        self.pose.translation + self.pose.rotation * self.center
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnchor {
    pub id: AnchorId,
    pub pose: Transform,
    pub image_name: String,
    pub physical_size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnchor {
    pub id: AnchorId,
    pub pose: Transform,
}

/// Everything a session can report tracking of. Plane anchors additionally
/// drive the surface overlay pipeline; the other kinds only receive a
/// scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedAnchor {
    Plane(PlaneAnchor),
    Image(ImageAnchor),
    Face(FaceAnchor),
}

impl TrackedAnchor {
    pub fn id(&self) -> AnchorId {
        match self {
            TrackedAnchor::Plane(plane) => plane.id,
            TrackedAnchor::Image(image) => image.id,
            TrackedAnchor::Face(face) => face.id,
        }
    }

    pub fn pose(&self) -> Transform {
        match self {
            TrackedAnchor::Plane(plane) => plane.pose,
            TrackedAnchor::Image(image) => image.pose,
            TrackedAnchor::Face(face) => face.pose,
        }
    }

    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            TrackedAnchor::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TrackedAnchor::Plane(_) => "plane",
            TrackedAnchor::Image(_) => "image",
            TrackedAnchor::Face(_) => "face",
        }
    }
}

/// Anchor lifecycle callbacks, delivered in session order.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum AnchorEvent {
    Added(TrackedAnchor),
    Updated(TrackedAnchor),
    Removed(AnchorId),
}

/// Coarse tracking quality reported by the session.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPhase {
    #[default]
    Initialising,
    Normal,
    Limited(LimitedReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Relocalising,
}

impl std::fmt::Display for TrackingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingPhase::Initialising => write!(f, "initialising"),
            TrackingPhase::Normal => write!(f, "normal"),
            TrackingPhase::Limited(reason) => write!(f, "limited ({reason})"),
        }
    }
}

impl std::fmt::Display for LimitedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LimitedReason::ExcessiveMotion => "excessive motion",
            LimitedReason::InsufficientFeatures => "insufficient features",
            LimitedReason::Relocalising => "relocalising",
        };
        write!(f, "{label}")
    }
}
