//! Common types and enums for the controller.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Named fire-once signal consumed by the animation system.
///
/// The string names match the trigger parameters of the character animation
/// graphs the controller was authored against, so they can be used as keys
/// when wiring clips by name.
///
/// # Example
/// ```
/// use bevy_player_controller::types::AnimationTrigger;
///
/// assert_eq!(AnimationTrigger::RunForward.name(), "RunForward");
/// assert!(AnimationTrigger::WalkForward.loops());
/// assert!(!AnimationTrigger::JumpUp.loops());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AnimationTrigger {
    Idle,
    WalkForward,
    WalkBackward,
    RunForward,
    JumpUp,
}

impl AnimationTrigger {
    /// All triggers, in declaration order.
    pub const ALL: [AnimationTrigger; 5] = [
        AnimationTrigger::Idle,
        AnimationTrigger::WalkForward,
        AnimationTrigger::WalkBackward,
        AnimationTrigger::RunForward,
        AnimationTrigger::JumpUp,
    ];

    /// Trigger parameter name.
    pub fn name(&self) -> &'static str {
        match self {
            AnimationTrigger::Idle => "Idle",
            AnimationTrigger::WalkForward => "WalkForward",
            AnimationTrigger::WalkBackward => "WalkBackward",
            AnimationTrigger::RunForward => "RunForward",
            AnimationTrigger::JumpUp => "JumpUp",
        }
    }

    /// Looks a trigger up by its parameter name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|trigger| trigger.name() == name)
    }

    /// Whether the clip behind this trigger should loop.
    ///
    /// Everything except the jump take-off is a locomotion cycle.
    pub fn loops(&self) -> bool {
        !matches!(self, AnimationTrigger::JumpUp)
    }
}

/// Locomotion state tracked alongside the animation triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Reflect)]
pub enum LocomotionState {
    #[default]
    Idle,
    WalkForward,
    WalkBackward,
    RunForward,
    JumpUp,
}

impl From<AnimationTrigger> for LocomotionState {
    fn from(trigger: AnimationTrigger) -> Self {
        match trigger {
            AnimationTrigger::Idle => LocomotionState::Idle,
            AnimationTrigger::WalkForward => LocomotionState::WalkForward,
            AnimationTrigger::WalkBackward => LocomotionState::WalkBackward,
            AnimationTrigger::RunForward => LocomotionState::RunForward,
            AnimationTrigger::JumpUp => LocomotionState::JumpUp,
        }
    }
}

/// How key edges are translated into locomotion transitions.
///
/// # Variants
/// * `Classic` - Each key edge sets its own trigger and resets the one it
///   replaces. Running is only toggled while walking.
/// * `Unified` - Every transition goes through a single state setter that
///   recomputes speed, sets the trigger and resets `Idle`. Leaving the run
///   requires having entered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum LocomotionStyle {
    Classic,
    #[default]
    Unified,
}

/// Speed change applied while the run key is held.
///
/// # Example
/// ```
/// use bevy_player_controller::types::RunBoost;
///
/// assert_eq!(RunBoost::Multiplier(2.0).apply(1.5), 3.0);
/// assert_eq!(RunBoost::Additive(2.0).apply(1.5), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub enum RunBoost {
    /// Bonus added to the base speed
    Additive(f32),
    /// Factor the base speed is multiplied by
    Multiplier(f32),
}

impl Default for RunBoost {
    fn default() -> Self {
        RunBoost::Multiplier(2.0)
    }
}

impl RunBoost {
    /// Running speed for the given base speed.
    pub fn apply(&self, base: f32) -> f32 {
        match *self {
            RunBoost::Additive(bonus) => base + bonus,
            RunBoost::Multiplier(factor) => base * factor,
        }
    }
}

/// How the body is moved at the physics step.
///
/// # Variants
/// * `Kinematic` - The transform is translated along its forward vector by
///   `vertical axis * current speed * fixed dt`.
/// * `Velocity` - While the forward key is held the horizontal linear velocity
///   is set to `forward * current speed`; while the backward key is held it is
///   set to `-forward * backward speed`. Vertical velocity is left to gravity.
///   Requires the `dim3` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum MovementDrive {
    #[default]
    Kinematic,
    Velocity,
}

/// How the body yaws in response to the turn inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum TurnMode {
    /// Yaw by the smoothed horizontal axis at the physics step
    #[default]
    PhysicsAxis,
    /// Yaw at a constant rate every frame while a turn key is held
    FrameKeys,
    /// Only mouse look turns the body
    None,
}

/// Key edges seen this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub struct MovementEdges {
    pub forward_pressed: bool,
    pub forward_released: bool,
    pub backward_pressed: bool,
    pub backward_released: bool,
    pub run_pressed: bool,
    pub run_released: bool,
}

impl MovementEdges {
    /// True when no edge fired.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response curve of a digital virtual axis.
///
/// # Fields
/// * `sensitivity` - Units per second the value moves toward a held target
/// * `gravity` - Units per second the value falls back to zero when released
/// * `snap` - Jump to zero first when the target reverses direction
#[derive(Clone, Copy, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct AxisResponse {
    pub sensitivity: f32,
    pub gravity: f32,
    pub snap: bool,
}

impl Default for AxisResponse {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            gravity: 3.0,
            snap: true,
        }
    }
}

/// Smoothed value of a pair of opposing keys, always within [-1, 1].
///
/// # Example
/// ```
/// use bevy_player_controller::types::{AxisResponse, VirtualAxis};
///
/// let mut axis = VirtualAxis::default();
/// let response = AxisResponse::default();
/// axis.step(1.0, 0.1, &response);
/// assert!((axis.value() - 0.3).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default, Reflect)]
pub struct VirtualAxis {
    value: f32,
}

impl VirtualAxis {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advances the axis toward `target` over `dt` seconds and returns the new value.
    pub fn step(&mut self, target: f32, dt: f32, response: &AxisResponse) -> f32 {
        let target = target.clamp(-1.0, 1.0);
        if target != 0.0 {
            if response.snap && self.value != 0.0 && self.value.signum() != target.signum() {
                self.value = 0.0;
            }
            self.value = move_towards(self.value, target, response.sensitivity * dt);
        } else {
            self.value = move_towards(self.value, 0.0, response.gravity * dt);
        }
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Digital axis target from a negative and a positive key.
pub fn axis_target(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}
