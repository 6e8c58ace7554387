use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;

use constants::render_settings::{
    OBSERVER_DEFAULT_DISTANCE, OBSERVER_DEFAULT_FOCUS, OBSERVER_DEFAULT_PITCH,
    OBSERVER_DEFAULT_YAW, OBSERVER_DOLLY_STEP, OBSERVER_MAX_DISTANCE, OBSERVER_MIN_DISTANCE,
    OBSERVER_ORBIT_SENSITIVITY, OBSERVER_PAN_SPEED, OBSERVER_SMOOTHING,
};

/// Orbit-style observer around the recorded scene. The capture device's
/// own motion is not replayed; a free observer reads better on a desktop.
#[derive(Resource)]
pub struct ObserverCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for ObserverCamera {
    fn default() -> Self {
        Self {
            focus: OBSERVER_DEFAULT_FOCUS,
            distance: OBSERVER_DEFAULT_DISTANCE,
            yaw: OBSERVER_DEFAULT_YAW,
            pitch: OBSERVER_DEFAULT_PITCH,
        }
    }
}

impl ObserverCamera {
    fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    fn eye_position(&self) -> Vec3 {
        self.focus + self.view_rotation() * Vec3::Z * self.distance
    }
}

pub fn spawn_observer_camera(commands: &mut Commands, observer: &ObserverCamera) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(observer.eye_position())
            .with_rotation(observer.view_rotation()),
        Name::new("observer_camera"),
    ));
}

pub fn camera_controller(
    mut cameras: Query<&mut Transform, With<Camera3d>>,
    mut observer: ResMut<ObserverCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    // Right drag orbits the focus point.
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        observer.yaw += -mouse_delta.x * OBSERVER_ORBIT_SENSITIVITY;
        observer.pitch += -mouse_delta.y * OBSERVER_ORBIT_SENSITIVITY;
        observer.pitch = observer.pitch.clamp(-1.55, 1.55);
    }

    // Mouse wheel scroll accumulation (line and pixel scroll).
    let mut scroll_accum = 0.0;
    for event in scroll_events.read() {
        scroll_accum += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let step = observer.distance * OBSERVER_DOLLY_STEP;
        observer.distance = (observer.distance - scroll_accum * step)
            .clamp(OBSERVER_MIN_DISTANCE, OBSERVER_MAX_DISTANCE);
    }

    // Keyboard pans the focus across the ground, E and Q lift it.
    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        move_input.y -= 1.0;
    }

    if move_input != Vec3::ZERO {
        let view_rot = observer.view_rotation();
        let mut forward = view_rot * Vec3::Z;
        forward.y = 0.0;
        let forward = forward.normalize_or_zero();
        let right = view_rot * Vec3::X;

        // Shift speeds panning up, ctrl slows it down.
        let mut speed = OBSERVER_PAN_SPEED * observer.distance;
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.0;
        }
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }

        let world_delta = right * move_input.x + Vec3::Y * move_input.y + forward * move_input.z;
        observer.focus += world_delta.normalize_or_zero() * speed * time.delta_secs();
    }

    // Ease toward the target pose.
    let target_rot = observer.view_rotation();
    let target_pos = observer.eye_position();
    let lerp_speed = (OBSERVER_SMOOTHING * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
