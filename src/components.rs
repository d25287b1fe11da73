//! Core components for the character controller.

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

use crate::types::{
    AnimationTrigger, LocomotionState, LocomotionStyle, MovementDrive, MovementEdges, RunBoost,
    TurnMode, VirtualAxis,
};

/// Main controller component with movement tuning.
///
/// Marks the entity whose transform (and rigid body, with `dim3`) is driven by
/// the controller systems. Every other controller component is optional and
/// enables one behaviour when present.
///
/// # Fields
/// * `base_speed` - Walking speed in units per second
/// * `current_speed` - Speed in effect right now (base or running)
/// * `backward_speed` - Speed used by the velocity drive while backing up
/// * `rotation_speed` - Yaw rate in degrees per second
/// * `drive` - How the body is moved at the physics step
/// * `turn` - How the turn inputs yaw the body
///
/// # Example
/// ```
/// use bevy_player_controller::prelude::*;
///
/// let controller = PlayerController::new(5.0)
///     .with_rotation_speed(120.0)
///     .with_turn(TurnMode::PhysicsAxis);
/// assert_eq!(controller.current_speed, 5.0);
/// ```
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
#[require(ControllerInput, Transform)]
pub struct PlayerController {
    /// Walking speed (units/s)
    pub base_speed: f32,
    /// Speed currently applied (units/s)
    pub current_speed: f32,
    /// Backward speed for the velocity drive (units/s)
    pub backward_speed: f32,
    /// Yaw rate (degrees/s)
    pub rotation_speed: f32,
    pub drive: MovementDrive,
    pub turn: TurnMode,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl PlayerController {
    /// Creates a controller walking at `speed` with a 120 deg/s turn rate.
    pub fn new(speed: f32) -> Self {
        Self {
            base_speed: speed,
            current_speed: speed,
            backward_speed: speed,
            rotation_speed: 120.0,
            drive: MovementDrive::Kinematic,
            turn: TurnMode::PhysicsAxis,
        }
    }

    /// Builder pattern: set rotation speed (degrees/s)
    pub fn with_rotation_speed(mut self, degrees_per_second: f32) -> Self {
        self.rotation_speed = degrees_per_second;
        self
    }

    /// Builder pattern: set backward speed
    pub fn with_backward_speed(mut self, speed: f32) -> Self {
        self.backward_speed = speed;
        self
    }

    /// Builder pattern: set movement drive
    pub fn with_drive(mut self, drive: MovementDrive) -> Self {
        self.drive = drive;
        self
    }

    /// Builder pattern: set turn mode
    pub fn with_turn(mut self, turn: TurnMode) -> Self {
        self.turn = turn;
        self
    }

    /// Changes the base speed and drops any running bonus.
    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = speed;
        self.current_speed = speed;
    }
}

/// Per-frame input intent of one controller.
///
/// Filled by the keyboard sampler when keyboard input exists, but any system
/// (AI, replay, network) may write it instead; the controller systems only
/// read this component.
///
/// # Fields
/// * `vertical` - Smoothed forward/backward axis in [-1, 1]
/// * `horizontal` - Smoothed turn axis in [-1, 1], positive turns right
/// * `look` - Mouse axes this frame, positive x is right and positive y is up
/// * `edges` - Key presses and releases seen this frame
/// * `jump_pressed` - Jump button went down this frame
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component)]
pub struct ControllerInput {
    pub vertical: f32,
    pub horizontal: f32,
    pub look: Vec2,
    pub forward_held: bool,
    pub backward_held: bool,
    pub turn_left_held: bool,
    pub turn_right_held: bool,
    pub run_held: bool,
    pub edges: MovementEdges,
    pub jump_pressed: bool,
    pub vertical_axis: VirtualAxis,
    pub horizontal_axis: VirtualAxis,
}

impl ControllerInput {
    /// Clears the one-frame signals (edges, jump, look).
    pub fn clear_frame_signals(&mut self) {
        self.edges = MovementEdges::default();
        self.jump_pressed = false;
        self.look = Vec2::ZERO;
    }
}

/// Mouse look: pitches a camera and yaws the body.
///
/// # Fields
/// * `camera` - Camera entity whose local rotation carries the pitch
/// * `sensitivity` - Multiplier applied to the mouse axes (degrees per axis unit per second)
/// * `pitch` - Accumulated pitch in degrees, positive looks up
/// * `pitch_limit` - Pitch is clamped to `[-pitch_limit, pitch_limit]`
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct MouseLook {
    pub camera: Option<Entity>,
    pub sensitivity: f32,
    pub pitch: f32,
    pub pitch_limit: f32,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self {
            camera: None,
            sensitivity: 100.0,
            pitch: 0.0,
            pitch_limit: 90.0,
        }
    }
}

impl MouseLook {
    pub fn new(camera: Entity) -> Self {
        Self {
            camera: Some(camera),
            ..Default::default()
        }
    }

    /// Builder pattern: set sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }
}

/// Walk/run animation state machine.
///
/// # Fields
/// * `style` - Which edge rules drive the transitions
/// * `run_boost` - Speed change while running
/// * `walking` - A walk key is down
/// * `running` - The run key went down while walking
/// * `state` - Last state entered
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component)]
#[require(AnimationTriggers)]
pub struct Locomotion {
    pub style: LocomotionStyle,
    pub run_boost: RunBoost,
    pub walking: bool,
    pub running: bool,
    pub state: LocomotionState,
}

impl Locomotion {
    pub fn new(style: LocomotionStyle, run_boost: RunBoost) -> Self {
        Self {
            style,
            run_boost,
            ..Default::default()
        }
    }

    /// Trigger matching the current walking/running flags.
    pub fn movement_trigger(&self) -> AnimationTrigger {
        if self.running {
            AnimationTrigger::RunForward
        } else if self.walking {
            AnimationTrigger::WalkForward
        } else {
            AnimationTrigger::Idle
        }
    }
}

/// Jump tuning and sequencing.
///
/// # Fields
/// * `force` - Upward velocity change applied per jump (units/s)
/// * `grounded` - The body may jump
/// * `require_grounded` - Refuse jumps while not grounded
/// * `recovery` - Delay after take-off before `grounded` is restored; `None` never clears it
/// * `landing` - Running recovery timer
/// * `pending_impulse` - Velocity change waiting for the next physics step
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct Jump {
    pub force: f32,
    pub grounded: bool,
    pub require_grounded: bool,
    pub recovery: Option<Duration>,
    pub landing: Option<Timer>,
    pub pending_impulse: f32,
}

impl Default for Jump {
    fn default() -> Self {
        Self {
            force: 5.0,
            grounded: true,
            require_grounded: false,
            recovery: None,
            landing: None,
            pending_impulse: 0.0,
        }
    }
}

impl Jump {
    pub fn new(force: f32) -> Self {
        Self {
            force,
            ..Default::default()
        }
    }

    /// Builder pattern: lock out jumps for `delay` after take-off.
    pub fn with_recovery(mut self, delay: Duration) -> Self {
        self.require_grounded = true;
        self.recovery = Some(delay);
        self
    }

    /// True while a landing timer is running.
    pub fn is_airborne(&self) -> bool {
        self.landing.is_some()
    }
}

/// One-shot sound played on every accepted jump.
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct JumpSound {
    /// Clip to play; nothing is played when absent
    pub clip: Option<Handle<AudioSource>>,
    /// Linear volume
    pub volume: f32,
}

impl Default for JumpSound {
    fn default() -> Self {
        Self {
            clip: None,
            volume: 1.0,
        }
    }
}

impl JumpSound {
    pub fn new(clip: Handle<AudioSource>) -> Self {
        Self {
            clip: Some(clip),
            ..Default::default()
        }
    }

    /// Builder pattern: set volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}

/// Animation triggers currently set on the entity, most recent last.
///
/// Setting a trigger that is already set moves it to the end; resetting
/// removes it. The animation bridge consumes the most recent one.
///
/// # Example
/// ```
/// use bevy_player_controller::prelude::*;
///
/// let mut triggers = AnimationTriggers::default();
/// triggers.set(AnimationTrigger::WalkForward);
/// triggers.set(AnimationTrigger::Idle);
/// triggers.reset(AnimationTrigger::Idle);
/// assert_eq!(triggers.latest(), Some(AnimationTrigger::WalkForward));
/// ```
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component)]
pub struct AnimationTriggers {
    set: Vec<AnimationTrigger>,
}

impl AnimationTriggers {
    pub fn set(&mut self, trigger: AnimationTrigger) {
        self.set.retain(|t| *t != trigger);
        self.set.push(trigger);
    }

    pub fn reset(&mut self, trigger: AnimationTrigger) {
        self.set.retain(|t| *t != trigger);
    }

    pub fn is_set(&self, trigger: AnimationTrigger) -> bool {
        self.set.contains(&trigger)
    }

    /// Most recently set trigger that has not been reset or consumed.
    pub fn latest(&self) -> Option<AnimationTrigger> {
        self.set.last().copied()
    }

    /// Removes and returns the most recently set trigger.
    pub fn consume_latest(&mut self) -> Option<AnimationTrigger> {
        self.set.pop()
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Set triggers, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = AnimationTrigger> + '_ {
        self.set.iter().copied()
    }
}

/// Binds triggers to nodes of an animation graph played by `player`.
///
/// The graph itself is built and attached to the player by the application
/// (usually from a glTF); this component only names which node answers which
/// trigger.
#[derive(Component, Clone, Debug)]
pub struct AnimationClipMap {
    /// Entity carrying the `AnimationPlayer`
    pub player: Entity,
    pub nodes: HashMap<AnimationTrigger, AnimationNodeIndex>,
    /// Trigger whose clip is currently playing
    pub playing: Option<AnimationTrigger>,
}

impl AnimationClipMap {
    pub fn new(player: Entity) -> Self {
        Self {
            player,
            nodes: HashMap::new(),
            playing: None,
        }
    }

    /// Builder pattern: bind a trigger to a graph node
    pub fn with_node(mut self, trigger: AnimationTrigger, node: AnimationNodeIndex) -> Self {
        self.nodes.insert(trigger, node);
        self
    }
}
