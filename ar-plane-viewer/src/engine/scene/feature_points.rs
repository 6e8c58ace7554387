use bevy::prelude::*;

use constants::overlay::{FEATURE_POINT_COLOUR, FEATURE_POINT_RADIUS};

use crate::session::config::SessionConfig;
use crate::session::feed::FeatureCloud;

/// Draws the sparse point cloud the session reports. Gizmos are immediate
/// mode, so a wholesale cloud replacement simply draws differently next
/// frame.
pub fn draw_feature_points(
    mut gizmos: Gizmos,
    config: Res<SessionConfig>,
    cloud: Res<FeatureCloud>,
) {
    if !config.show_feature_points {
        return;
    }
    for point in &cloud.points {
        gizmos.sphere(*point, FEATURE_POINT_RADIUS, FEATURE_POINT_COLOUR);
    }
}
