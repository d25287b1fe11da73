//! Jump sequencing - lock-out, take-off trigger, timed recovery and impulse.

use std::time::Duration;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::components::{AnimationTriggers, ControllerInput, Jump, Locomotion, PlayerController};
use crate::events::{JumpEvent, LandedEvent, LocomotionChanged};
use crate::types::{AnimationTrigger, LocomotionState};

impl Jump {
    /// Try to start a jump.
    ///
    /// Refused while grounding is required and the body is not grounded.
    /// Otherwise the impulse is queued for the next physics step and, when a
    /// recovery delay is configured, `grounded` is cleared and the landing
    /// timer started.
    ///
    /// # Returns
    /// Whether the jump was accepted
    pub fn try_begin(&mut self) -> bool {
        if self.require_grounded && !self.grounded {
            return false;
        }
        self.pending_impulse = self.force;
        if let Some(delay) = self.recovery {
            self.grounded = false;
            self.landing = Some(Timer::new(delay, TimerMode::Once));
        }
        true
    }

    /// Advance the landing timer.
    ///
    /// # Returns
    /// True on the tick the recovery delay elapses; `grounded` is restored then.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.landing.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if !timer.just_finished() {
            return false;
        }
        self.landing = None;
        self.grounded = true;
        true
    }

    /// Take the impulse queued by [`Jump::try_begin`].
    pub fn take_impulse(&mut self) -> Option<f32> {
        if self.pending_impulse == 0.0 {
            return None;
        }
        Some(std::mem::take(&mut self.pending_impulse))
    }
}

/// Fire the landing trigger chosen from the locomotion flags and clear the take-off trigger.
pub fn land(locomotion: Option<&mut Locomotion>, triggers: Option<&mut AnimationTriggers>) -> AnimationTrigger {
    let trigger = locomotion
        .as_deref()
        .map_or(AnimationTrigger::Idle, Locomotion::movement_trigger);

    if let Some(locomotion) = locomotion {
        locomotion.state = trigger.into();
    }
    if let Some(triggers) = triggers {
        triggers.set(trigger);
        triggers.reset(AnimationTrigger::JumpUp);
    }
    trigger
}

/// Start jumps for controllers whose jump button went down this frame.
///
/// Only jumps with a recovery delay enter the `JumpUp` state; the landing
/// brings them back out of it.
///
/// # Arguments
/// * `jumps` - Message writer for accepted jumps
/// * `changes` - Message writer for locomotion state changes
/// * `query` - Controllers with a `Jump`
pub fn handle_jump_input(
    mut jumps: MessageWriter<JumpEvent>,
    mut changes: MessageWriter<LocomotionChanged>,
    mut query: Query<
        (
            Entity,
            &ControllerInput,
            &mut Jump,
            Option<&mut Locomotion>,
            Option<&mut AnimationTriggers>,
        ),
        With<PlayerController>,
    >,
) {
    for (entity, input, mut jump, locomotion, triggers) in query.iter_mut() {
        if !input.jump_pressed {
            continue;
        }
        if !jump.try_begin() {
            debug!("{entity:?} jump ignored while airborne");
            continue;
        }

        // Without a recovery delay nothing would ever land the jump.
        if jump.recovery.is_some() {
            if let Some(mut triggers) = triggers {
                triggers.set(AnimationTrigger::JumpUp);
            }
            if let Some(mut locomotion) = locomotion {
                let from = locomotion.state;
                locomotion.state = LocomotionState::JumpUp;
                if from != LocomotionState::JumpUp {
                    changes.write(LocomotionChanged {
                        entity,
                        from,
                        to: LocomotionState::JumpUp,
                    });
                }
            }
        }

        debug!("{entity:?} jumped with force {}", jump.force);
        jumps.write(JumpEvent {
            entity,
            force: jump.force,
        });
    }
}

/// Tick landing timers and restore grounded controllers.
///
/// The landing trigger reflects the walking/running flags at the moment the
/// delay elapses, not at take-off.
pub fn update_jump_recovery(
    time: Res<Time>,
    mut landed: MessageWriter<LandedEvent>,
    mut changes: MessageWriter<LocomotionChanged>,
    mut query: Query<(
        Entity,
        &mut Jump,
        Option<&mut Locomotion>,
        Option<&mut AnimationTriggers>,
    )>,
) {
    for (entity, mut jump, mut locomotion, triggers) in query.iter_mut() {
        if !jump.is_airborne() || !jump.tick(time.delta()) {
            continue;
        }

        let from = locomotion.as_ref().map(|l| l.state);
        let trigger = land(locomotion.as_deref_mut(), triggers.map(|t| t.into_inner()));
        if let Some(from) = from {
            let to = LocomotionState::from(trigger);
            if from != to {
                changes.write(LocomotionChanged { entity, from, to });
            }
        }

        debug!("{entity:?} landed into {:?}", trigger);
        landed.write(LandedEvent { entity, trigger });
    }
}

#[cfg(feature = "dim3")]
use avian3d::prelude::LinearVelocity;

/// Apply queued jump impulses as an upward velocity change.
///
/// Mass independent, like a velocity-change impulse.
#[cfg(feature = "dim3")]
pub fn apply_jump_impulse(mut query: Query<(&mut Jump, &mut LinearVelocity)>) {
    for (mut jump, mut velocity) in query.iter_mut() {
        if let Some(impulse) = jump.take_impulse() {
            velocity.0 += Vec3::Y * impulse;
        }
    }
}
