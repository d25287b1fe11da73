use bevy::prelude::*;

use crate::components::{Jump, Locomotion, MouseLook, PlayerController};
use crate::resources::ControllerConfig;
use crate::systems::look::pitch_rotation;
use crate::types::LocomotionState;

/// Draw debug gizmos for controllers.
///
/// Draws the heading colored by locomotion state, the look direction and a
/// marker while a jump is locked out.
pub fn draw_controller_debug(
    mut gizmos: Gizmos,
    config: Res<ControllerConfig>,
    query: Query<(
        &Transform,
        &PlayerController,
        Option<&Locomotion>,
        Option<&Jump>,
        Option<&MouseLook>,
    )>,
) {
    if !config.debug_draw {
        return;
    }

    for (transform, controller, locomotion, jump, look) in query.iter() {
        let origin = transform.translation;
        let forward = *transform.forward();

        let color = match locomotion.map(|l| l.state) {
            Some(LocomotionState::RunForward) => Color::srgb(1.0, 0.2, 0.2),
            Some(LocomotionState::WalkForward | LocomotionState::WalkBackward) => Color::srgb(1.0, 0.9, 0.2),
            Some(LocomotionState::JumpUp) => Color::srgb(0.2, 0.4, 1.0),
            _ => Color::srgb(0.2, 1.0, 0.2),
        };
        gizmos.arrow(origin, origin + forward * controller.current_speed.max(0.5), color);

        if let Some(look) = look {
            let view = transform.rotation * pitch_rotation(look.pitch) * Vec3::NEG_Z;
            gizmos.line(origin, origin + view * 2.0, Color::WHITE);
        }

        if jump.is_some_and(|j| !j.grounded) {
            gizmos.sphere(origin, 0.2, Color::srgb(0.2, 0.4, 1.0));
        }
    }
}
