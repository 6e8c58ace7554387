//! Asset paths, relative to the crate `assets/` directory.

pub const SESSION_RECORDING: &str = "sessions/tabletop.session.json";
pub const MODEL_CATALOG: &str = "catalog/models.catalog.json";
