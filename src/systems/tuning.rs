//! Pushes the shared tuning profile onto controllers.

use bevy::prelude::*;

use crate::components::{Jump, JumpSound, Locomotion, MouseLook, PlayerController};
use crate::resources::ControllerTuning;

/// Apply `ControllerTuning` to every controller.
///
/// Scheduled to run only when the resource was inserted or changed.
pub fn apply_tuning(
    tuning: Res<ControllerTuning>,
    mut query: Query<(
        &mut PlayerController,
        Option<&mut Locomotion>,
        Option<&mut Jump>,
        Option<&mut JumpSound>,
        Option<&mut MouseLook>,
    )>,
) {
    let mut count = 0;
    for (mut controller, locomotion, jump, sound, look) in query.iter_mut() {
        tuning.apply(
            &mut controller,
            locomotion.map(Mut::into_inner),
            jump.map(Mut::into_inner),
            sound.map(Mut::into_inner),
            look.map(Mut::into_inner),
        );
        count += 1;
    }
    info!("Applied controller tuning to {count} controllers");
}
