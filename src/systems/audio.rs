use bevy::audio::Volume;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::components::JumpSound;
use crate::events::JumpEvent;

/// Play the jump sound of every controller that jumped.
///
/// Each sound is a self-despawning one-shot player; controllers without a
/// clip stay silent.
pub fn play_jump_sound(
    mut commands: Commands,
    mut jumps: MessageReader<JumpEvent>,
    sounds: Query<&JumpSound>,
) {
    for jump in jumps.read() {
        let Ok(sound) = sounds.get(jump.entity) else {
            continue;
        };
        let Some(clip) = sound.clip.as_ref() else {
            continue;
        };

        commands.spawn((
            AudioPlayer::new(clip.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(sound.volume)),
            Name::new("Jump Sound"),
        ));
    }
}
