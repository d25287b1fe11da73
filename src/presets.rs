//! Ready-made controller setups.
//!
//! Each preset returns the component bundle of one controller variant with
//! its stock tuning. Add a mesh, collider and rigid body next to it.

use std::time::Duration;

use bevy::prelude::*;

use crate::components::{Jump, JumpSound, Locomotion, MouseLook, PlayerController};
use crate::types::{LocomotionStyle, MovementDrive, RunBoost, TurnMode};

/// Post-jump lock-out of the merged controller.
pub const JUMP_RECOVERY: Duration = Duration::from_millis(700);

/// Mouse-look mover: axis movement and turning, unrestricted jumps with a sound.
///
/// - Speed 5, turn 120 deg/s
/// - Jump force 5, no grounding check
/// - Mouse sensitivity 100
pub fn basic_mover(camera: Entity) -> impl Bundle {
    (
        PlayerController::new(5.0)
            .with_rotation_speed(120.0)
            .with_drive(MovementDrive::Kinematic)
            .with_turn(TurnMode::PhysicsAxis),
        MouseLook::new(camera).with_sensitivity(100.0),
        Jump::new(5.0),
        JumpSound::default(),
    )
}

/// Keyboard walk/run controller without camera or jump.
///
/// - Walk 2, backward 1.5, run bonus +2 (velocity drive)
/// - Turn 100 deg/s while A/D are held
/// - Classic trigger rules
pub fn walk_run() -> impl Bundle {
    (
        PlayerController::new(2.0)
            .with_backward_speed(1.5)
            .with_rotation_speed(100.0)
            .with_drive(MovementDrive::Velocity)
            .with_turn(TurnMode::FrameKeys),
        Locomotion::new(LocomotionStyle::Classic, RunBoost::Additive(2.0)),
    )
}

/// Full controller: mouse look, walk/run triggers and jump lock-out.
///
/// - Base speed 1, run x2, turn 80 deg/s
/// - Jump force 5, grounded again 0.7 s after take-off
/// - Mouse sensitivity 100
pub fn merged(camera: Entity) -> impl Bundle {
    (
        PlayerController::new(1.0)
            .with_rotation_speed(80.0)
            .with_drive(MovementDrive::Kinematic)
            .with_turn(TurnMode::PhysicsAxis),
        Locomotion::new(LocomotionStyle::Unified, RunBoost::Multiplier(2.0)),
        MouseLook::new(camera).with_sensitivity(100.0),
        Jump::new(5.0).with_recovery(JUMP_RECOVERY),
        JumpSound::default(),
    )
}
