//! Scene-side mirrors of session state: surface overlays, the feature
//! point cloud, and lighting.

pub mod feature_points;
pub mod lighting;
pub mod plane_overlay;
