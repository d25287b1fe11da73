//! Messages written by the controller systems.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::types::{AnimationTrigger, LocomotionState};

/// Written when a jump request is accepted.
///
/// # Fields
/// * `entity` - Controller that jumped
/// * `force` - Upward velocity change queued for the physics step
#[derive(Message, Clone, Debug)]
pub struct JumpEvent {
    pub entity: Entity,
    pub force: f32,
}

/// Written when the post-jump recovery delay ends and the controller may jump again.
///
/// `trigger` is the movement trigger fired on landing.
#[derive(Message, Clone, Debug)]
pub struct LandedEvent {
    pub entity: Entity,
    pub trigger: AnimationTrigger,
}

/// Written whenever a controller's locomotion state changes.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy::ecs::message::MessageReader;
/// use bevy_player_controller::prelude::*;
///
/// fn log_changes(mut changes: MessageReader<LocomotionChanged>) {
///     for change in changes.read() {
///         info!("{:?}: {:?} -> {:?}", change.entity, change.from, change.to);
///     }
/// }
/// ```
#[derive(Message, Clone, Debug, PartialEq)]
pub struct LocomotionChanged {
    pub entity: Entity,
    pub from: LocomotionState,
    pub to: LocomotionState,
}
