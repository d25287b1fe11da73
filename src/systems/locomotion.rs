//! Locomotion - walk/run state machine and body movement.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::components::{AnimationTriggers, ControllerInput, Locomotion, PlayerController};
use crate::events::LocomotionChanged;
use crate::systems::look::yaw_rotation;
use crate::types::{AnimationTrigger, LocomotionState, LocomotionStyle, MovementDrive, MovementEdges, TurnMode};

impl Locomotion {
    /// Apply this frame's key edges.
    ///
    /// Updates the walking/running flags, the controller's current speed and
    /// the animation triggers according to the locomotion style. Returns the
    /// `(from, to)` states when the state changed.
    ///
    /// # Example
    /// ```
    /// use bevy_player_controller::prelude::*;
    ///
    /// let mut locomotion = Locomotion::new(LocomotionStyle::Unified, RunBoost::Multiplier(2.0));
    /// let mut controller = PlayerController::new(1.0);
    /// let mut triggers = AnimationTriggers::default();
    ///
    /// let edges = MovementEdges { forward_pressed: true, ..Default::default() };
    /// locomotion.apply_edges(&edges, &mut controller, &mut triggers);
    /// let edges = MovementEdges { run_pressed: true, ..Default::default() };
    /// locomotion.apply_edges(&edges, &mut controller, &mut triggers);
    ///
    /// assert_eq!(controller.current_speed, 2.0);
    /// assert_eq!(locomotion.state, LocomotionState::RunForward);
    /// ```
    pub fn apply_edges(
        &mut self,
        edges: &MovementEdges,
        controller: &mut PlayerController,
        triggers: &mut AnimationTriggers,
    ) -> Option<(LocomotionState, LocomotionState)> {
        if edges.is_empty() {
            return None;
        }

        let before = self.state;
        match self.style {
            LocomotionStyle::Classic => self.apply_classic(edges, controller, triggers),
            LocomotionStyle::Unified => self.apply_unified(edges, controller, triggers),
        }

        (self.state != before).then_some((before, self.state))
    }

    fn apply_classic(
        &mut self,
        edges: &MovementEdges,
        controller: &mut PlayerController,
        triggers: &mut AnimationTriggers,
    ) {
        if edges.forward_pressed {
            triggers.set(AnimationTrigger::WalkForward);
            triggers.reset(AnimationTrigger::Idle);
            self.walking = true;
            self.state = LocomotionState::WalkForward;
        }
        if edges.forward_released {
            triggers.reset(AnimationTrigger::WalkForward);
            triggers.set(AnimationTrigger::Idle);
            self.walking = false;
            self.running = false;
            controller.current_speed = controller.base_speed;
            self.state = LocomotionState::Idle;
        }
        if edges.backward_pressed {
            triggers.set(AnimationTrigger::WalkBackward);
            triggers.reset(AnimationTrigger::Idle);
            self.state = LocomotionState::WalkBackward;
        }
        if edges.backward_released {
            triggers.reset(AnimationTrigger::WalkBackward);
            triggers.set(AnimationTrigger::Idle);
            self.state = LocomotionState::Idle;
        }

        // Run toggles only while walking forward.
        if self.walking {
            if edges.run_pressed {
                controller.current_speed = self.run_boost.apply(controller.base_speed);
                triggers.set(AnimationTrigger::RunForward);
                triggers.reset(AnimationTrigger::WalkForward);
                self.running = true;
                self.state = LocomotionState::RunForward;
            }
            if edges.run_released {
                controller.current_speed = controller.base_speed;
                triggers.reset(AnimationTrigger::RunForward);
                triggers.set(AnimationTrigger::WalkForward);
                self.running = false;
                self.state = LocomotionState::WalkForward;
            }
        }
    }

    fn apply_unified(
        &mut self,
        edges: &MovementEdges,
        controller: &mut PlayerController,
        triggers: &mut AnimationTriggers,
    ) {
        if edges.forward_pressed {
            self.set_movement_state(true, false, AnimationTrigger::WalkForward, controller, triggers);
        } else if edges.forward_released {
            self.set_movement_state(false, false, AnimationTrigger::Idle, controller, triggers);
        }

        if edges.backward_pressed {
            self.set_movement_state(true, false, AnimationTrigger::WalkBackward, controller, triggers);
        } else if edges.backward_released {
            self.set_movement_state(false, false, AnimationTrigger::Idle, controller, triggers);
        }

        if self.walking && edges.run_pressed {
            self.set_movement_state(true, true, AnimationTrigger::RunForward, controller, triggers);
        } else if self.running && edges.run_released {
            self.set_movement_state(true, false, AnimationTrigger::WalkForward, controller, triggers);
        }
    }

    fn set_movement_state(
        &mut self,
        walking: bool,
        running: bool,
        trigger: AnimationTrigger,
        controller: &mut PlayerController,
        triggers: &mut AnimationTriggers,
    ) {
        self.walking = walking;
        self.running = running;
        controller.current_speed = if running {
            self.run_boost.apply(controller.base_speed)
        } else {
            controller.base_speed
        };

        triggers.set(trigger);
        triggers.reset(AnimationTrigger::Idle);
        if !walking && !running {
            triggers.set(AnimationTrigger::Idle);
        }
        self.state = trigger.into();
    }
}

/// Run the locomotion state machine on this frame's edges.
///
/// # Arguments
/// * `changes` - Message writer for state changes
/// * `query` - Controllers with locomotion
pub fn update_locomotion(
    mut changes: MessageWriter<LocomotionChanged>,
    mut query: Query<(
        Entity,
        &ControllerInput,
        &mut PlayerController,
        &mut Locomotion,
        &mut AnimationTriggers,
    )>,
) {
    for (entity, input, mut controller, mut locomotion, mut triggers) in query.iter_mut() {
        if input.edges.is_empty() {
            continue;
        }
        if let Some((from, to)) = locomotion.apply_edges(&input.edges, &mut controller, &mut triggers) {
            debug!("{entity:?} locomotion {from:?} -> {to:?} at speed {}", controller.current_speed);
            changes.write(LocomotionChanged { entity, from, to });
        }
    }
}

/// Yaw controllers at a constant rate while a turn key is held.
///
/// Frame-rate independent through the frame delta; runs in `Update`.
pub fn turn_with_keys(
    time: Res<Time>,
    mut query: Query<(&PlayerController, &ControllerInput, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (controller, input, mut transform) in query.iter_mut() {
        if controller.turn != TurnMode::FrameKeys {
            continue;
        }
        let mut degrees = 0.0;
        if input.turn_left_held {
            degrees -= controller.rotation_speed * dt;
        }
        if input.turn_right_held {
            degrees += controller.rotation_speed * dt;
        }
        if degrees != 0.0 {
            transform.rotate_local(yaw_rotation(degrees));
        }
    }
}

/// Yaw controllers by the smoothed horizontal axis at the physics step.
pub fn turn_with_axis(
    time: Res<Time>,
    mut query: Query<(&PlayerController, &ControllerInput, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (controller, input, mut transform) in query.iter_mut() {
        if controller.turn != TurnMode::PhysicsAxis || input.horizontal == 0.0 {
            continue;
        }
        let turn = input.horizontal * controller.rotation_speed * dt;
        transform.rotate_local(yaw_rotation(turn));
    }
}

/// Translation for one kinematic physics step.
pub fn kinematic_step(forward: Vec3, vertical: f32, speed: f32, dt: f32) -> Vec3 {
    forward * vertical * speed * dt
}

/// Move kinematically driven controllers along their forward vector.
///
/// # Arguments
/// * `time` - Fixed time
/// * `query` - Controllers and their transforms
pub fn move_kinematic(
    time: Res<Time>,
    mut query: Query<(&PlayerController, &ControllerInput, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (controller, input, mut transform) in query.iter_mut() {
        if controller.drive != MovementDrive::Kinematic || input.vertical == 0.0 {
            continue;
        }
        let forward = *transform.forward();
        transform.translation += kinematic_step(forward, input.vertical, controller.current_speed, dt);
    }
}

/// Horizontal velocity requested by the velocity drive, if any key is held.
///
/// The backward key wins when both are held.
pub fn drive_target(controller: &PlayerController, input: &ControllerInput, forward: Vec3) -> Option<Vec3> {
    if input.backward_held {
        Some(-forward * controller.backward_speed)
    } else if input.forward_held {
        Some(forward * controller.current_speed)
    } else {
        None
    }
}

#[cfg(feature = "dim3")]
use avian3d::prelude::LinearVelocity;

/// Set the horizontal velocity of velocity-driven rigid bodies.
///
/// Vertical velocity is kept so gravity and jumps still act on the body.
#[cfg(feature = "dim3")]
pub fn drive_velocity(
    mut query: Query<(&PlayerController, &ControllerInput, &Transform, &mut LinearVelocity)>,
) {
    for (controller, input, transform, mut velocity) in query.iter_mut() {
        if controller.drive != MovementDrive::Velocity {
            continue;
        }
        let forward = *transform.forward();
        if let Some(target) = drive_target(controller, input, forward) {
            velocity.0.x = target.x;
            velocity.0.z = target.z;
        }
    }
}
