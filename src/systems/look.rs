//! Mouse look - camera pitch and body yaw.

use bevy::prelude::*;

use crate::components::{ControllerInput, MouseLook, PlayerController};

/// Add a pitch delta and clamp the result to `[-limit, limit]` degrees.
///
/// # Example
/// ```
/// use bevy_player_controller::systems::look::accumulate_pitch;
///
/// assert_eq!(accumulate_pitch(80.0, 25.0, 90.0), 90.0);
/// assert_eq!(accumulate_pitch(-80.0, -25.0, 90.0), -90.0);
/// ```
pub fn accumulate_pitch(pitch: f32, delta: f32, limit: f32) -> f32 {
    (pitch + delta).clamp(-limit, limit)
}

/// Local camera rotation for a pitch in degrees (positive looks up).
pub fn pitch_rotation(pitch_degrees: f32) -> Quat {
    Quat::from_rotation_x(pitch_degrees.to_radians())
}

/// Rotation that turns a body `degrees` to the right around its up axis.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(-degrees.to_radians())
}

/// Apply mouse look to every controller with a `MouseLook`.
///
/// The horizontal mouse axis yaws the body, the vertical axis accumulates
/// into a clamped pitch that is written to the camera's local rotation.
/// Both are scaled by sensitivity and frame delta.
///
/// # Arguments
/// * `time` - Frame time
/// * `players` - Controllers with mouse look
/// * `cameras` - Camera transforms, disjoint from the controllers
pub fn apply_mouse_look(
    time: Res<Time>,
    mut players: Query<(&ControllerInput, &mut MouseLook, &mut Transform), With<PlayerController>>,
    mut cameras: Query<&mut Transform, Without<PlayerController>>,
) {
    let dt = time.delta_secs();

    for (input, mut look, mut transform) in players.iter_mut() {
        let mouse_x = input.look.x * look.sensitivity * dt;
        let mouse_y = input.look.y * look.sensitivity * dt;

        look.pitch = accumulate_pitch(look.pitch, mouse_y, look.pitch_limit);

        if let Some(camera) = look.camera {
            if let Ok(mut camera_transform) = cameras.get_mut(camera) {
                camera_transform.rotation = pitch_rotation(look.pitch);
            } else {
                warn_once!("Mouse look camera {camera:?} has no Transform; pitch is not applied");
            }
        }

        if mouse_x != 0.0 {
            transform.rotate_local(yaw_rotation(mouse_x));
        }
    }
}
