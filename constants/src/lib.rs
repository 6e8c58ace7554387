pub mod asset_paths;
pub mod overlay;
pub mod render_settings;
pub mod session;
