/// Upper bound on retained feature points. Recordings replace the cloud
/// wholesale, so the cap only guards against oversized captures.
pub const FEATURE_CLOUD_CAPACITY: usize = 512;

/// Raycast tolerance. Rays flatter than this against a surface plane are
/// treated as parallel, and hits closer than this are behind the origin.
pub const SURFACE_HIT_EPSILON: f32 = 1e-4;
