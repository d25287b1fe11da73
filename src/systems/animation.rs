//! Animation bridge - plays the clip bound to the most recent trigger.

use bevy::prelude::*;

use crate::components::{AnimationClipMap, AnimationTriggers};

/// Forward fired triggers to the bound `AnimationPlayer`.
///
/// The most recently set trigger wins; older pending triggers are dropped with
/// it so a stale request never plays a frame later. A trigger whose clip is
/// already playing does not restart it.
///
/// # Arguments
/// * `controllers` - Controllers whose triggers changed this frame
/// * `players` - Animation players referenced by the clip maps
pub fn drive_animation_players(
    mut controllers: Query<(Entity, &mut AnimationTriggers, &mut AnimationClipMap), Changed<AnimationTriggers>>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for (entity, mut triggers, mut clips) in controllers.iter_mut() {
        if triggers.latest().is_none() {
            continue;
        }
        let Some(trigger) = triggers.consume_latest() else {
            continue;
        };
        triggers.clear();

        if clips.playing == Some(trigger) {
            continue;
        }
        let Some(&node) = clips.nodes.get(&trigger) else {
            debug!("{entity:?} has no clip bound to {}", trigger.name());
            continue;
        };
        let Ok(mut player) = players.get_mut(clips.player) else {
            warn_once!("Animation player {:?} not found for controller {entity:?}", clips.player);
            continue;
        };

        player.stop_all();
        let active = player.play(node);
        if trigger.loops() {
            active.repeat();
        }
        clips.playing = Some(trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnimationTrigger;
    use bevy::animation::RepeatAnimation;

    struct Rig {
        app: App,
        player: Entity,
        controller: Entity,
        walk: AnimationNodeIndex,
        run: AnimationNodeIndex,
    }

    fn rig() -> Rig {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, drive_animation_players);

        let mut graph = AnimationGraph::new();
        let root = graph.root;
        let walk = graph.add_clip(Handle::default(), 1.0, root);
        let run = graph.add_clip(Handle::default(), 1.0, root);

        let player = app.world_mut().spawn(AnimationPlayer::default()).id();
        let controller = app
            .world_mut()
            .spawn((
                AnimationTriggers::default(),
                AnimationClipMap::new(player)
                    .with_node(AnimationTrigger::WalkForward, walk)
                    .with_node(AnimationTrigger::RunForward, run),
            ))
            .id();
        app.update();

        Rig {
            app,
            player,
            controller,
            walk,
            run,
        }
    }

    impl Rig {
        fn fire(&mut self, fired: &[AnimationTrigger]) {
            let mut triggers = self
                .app
                .world_mut()
                .get_mut::<AnimationTriggers>(self.controller)
                .unwrap();
            for &trigger in fired {
                triggers.set(trigger);
            }
            self.app.update();
        }

        fn playing(&self) -> Option<AnimationTrigger> {
            self.app.world().get::<AnimationClipMap>(self.controller).unwrap().playing
        }

        fn animation_player(&self) -> &AnimationPlayer {
            self.app.world().get::<AnimationPlayer>(self.player).unwrap()
        }

        fn pending(&self) -> usize {
            self.app
                .world()
                .get::<AnimationTriggers>(self.controller)
                .unwrap()
                .iter()
                .count()
        }
    }

    #[test]
    fn test_latest_trigger_wins_and_older_are_dropped() {
        let mut rig = rig();
        rig.fire(&[AnimationTrigger::RunForward, AnimationTrigger::WalkForward]);

        assert_eq!(rig.playing(), Some(AnimationTrigger::WalkForward));
        assert!(rig.animation_player().is_playing_animation(rig.walk));
        assert!(!rig.animation_player().is_playing_animation(rig.run));
        assert_eq!(rig.pending(), 0);
    }

    #[test]
    fn test_switching_clip_stops_previous_and_loops() {
        let mut rig = rig();
        rig.fire(&[AnimationTrigger::WalkForward]);
        rig.fire(&[AnimationTrigger::RunForward]);

        assert_eq!(rig.playing(), Some(AnimationTrigger::RunForward));
        let player = rig.animation_player();
        assert!(!player.is_playing_animation(rig.walk));
        assert!(player.is_playing_animation(rig.run));
        assert_eq!(
            player.animation(rig.run).unwrap().repeat_mode(),
            RepeatAnimation::Forever
        );
    }

    #[test]
    fn test_playing_clip_is_not_restarted() {
        let mut rig = rig();
        rig.fire(&[AnimationTrigger::WalkForward]);

        // Mark the active animation so a restart would be visible.
        let walk = rig.walk;
        rig.app
            .world_mut()
            .get_mut::<AnimationPlayer>(rig.player)
            .unwrap()
            .animation_mut(walk)
            .unwrap()
            .pause();

        rig.fire(&[AnimationTrigger::WalkForward]);

        let active = rig.animation_player().animation(walk).unwrap();
        assert!(active.is_paused());
        assert_eq!(rig.pending(), 0);
    }

    #[test]
    fn test_unmapped_trigger_is_consumed_without_stopping_clip() {
        let mut rig = rig();
        rig.fire(&[AnimationTrigger::RunForward]);
        rig.fire(&[AnimationTrigger::JumpUp]);

        assert_eq!(rig.playing(), Some(AnimationTrigger::RunForward));
        assert!(rig.animation_player().is_playing_animation(rig.run));
        assert_eq!(rig.pending(), 0);
    }
}
