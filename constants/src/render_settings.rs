use bevy::color::{Color, Srgba};
use bevy::math::Vec3;

/// Neutral backdrop, dark enough that translucent overlays stay legible.
pub const CLEAR_COLOUR: Color = Color::Srgba(Srgba {
    red: 0.016,
    green: 0.016,
    blue: 0.022,
    alpha: 1.0,
});

pub const KEY_LIGHT_ILLUMINANCE: f32 = 3_200.0;
pub const AMBIENT_BRIGHTNESS: f32 = 90.0;

// Observer camera tuning. The scene is tabletop scale, so distances are
// in tens of centimetres rather than metres.
pub const OBSERVER_DEFAULT_FOCUS: Vec3 = Vec3::new(0.0, 0.25, -0.4);
pub const OBSERVER_DEFAULT_DISTANCE: f32 = 2.2;
pub const OBSERVER_DEFAULT_YAW: f32 = 0.55;
pub const OBSERVER_DEFAULT_PITCH: f32 = -0.45;
pub const OBSERVER_ORBIT_SENSITIVITY: f32 = 0.0045;
pub const OBSERVER_PAN_SPEED: f32 = 0.9;
pub const OBSERVER_DOLLY_STEP: f32 = 0.12;
pub const OBSERVER_MIN_DISTANCE: f32 = 0.35;
pub const OBSERVER_MAX_DISTANCE: f32 = 6.0;
pub const OBSERVER_SMOOTHING: f32 = 12.0;

pub const HUD_FONT_SIZE: f32 = 14.0;
