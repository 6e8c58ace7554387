use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::session::anchor::PlaneAlignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    None,
    #[default]
    Horizontal,
    HorizontalAndVertical,
}

impl PlaneDetection {
    /// Whether a surface of the given alignment is reported at all.
    pub fn accepts(self, alignment: PlaneAlignment) -> bool {
        match self {
            PlaneDetection::None => false,
            PlaneDetection::Horizontal => alignment == PlaneAlignment::Horizontal,
            PlaneDetection::HorizontalAndVertical => true,
        }
    }
}

/// Session configuration the capture ran with. Recordings carry their own
/// copy so a replay behaves like the original run did.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub plane_detection: PlaneDetection,
    pub show_feature_points: bool,
    pub default_lighting: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetection::Horizontal,
            show_feature_points: true,
            default_lighting: true,
        }
    }
}
