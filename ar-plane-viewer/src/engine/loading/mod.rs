pub mod progress;
pub mod session_assets;
