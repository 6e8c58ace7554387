use bevy::prelude::*;

use constants::render_settings::{AMBIENT_BRIGHTNESS, KEY_LIGHT_ILLUMINANCE};

use crate::session::config::SessionConfig;

/// Key light plus ambient fill, standing in for the automatic lighting
/// the capture configuration enabled. Recordings made without default
/// lighting get neither.
pub fn spawn_scene_lighting(commands: &mut Commands, config: &SessionConfig) {
    if !config.default_lighting {
        return;
    }
    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(1.5, 2.5, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("key_light"),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
}
