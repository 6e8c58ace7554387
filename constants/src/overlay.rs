use bevy::color::{Color, Srgba};

/// Translucent tint applied to every detected-surface overlay.
pub const SURFACE_OVERLAY_COLOUR: Color = Color::Srgba(Srgba {
    red: 90.0 / 255.0,
    green: 200.0 / 255.0,
    blue: 250.0 / 255.0,
    alpha: 0.5,
});

/// Rotation about local X that lays an upright rectangle flat onto a
/// horizontal surface (rectangles face +Z when spawned).
pub const SURFACE_OVERLAY_TILT_RADIANS: f32 = -std::f32::consts::FRAC_PI_2;

pub const FEATURE_POINT_RADIUS: f32 = 0.004;

pub const FEATURE_POINT_COLOUR: Color = Color::Srgba(Srgba {
    red: 1.0,
    green: 0.85,
    blue: 0.25,
    alpha: 1.0,
});
