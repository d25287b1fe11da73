//! Systems module - all ECS systems of the controller.

pub mod animation;
pub mod audio;
pub mod debug;
pub mod input;
pub mod jump;
pub mod locomotion;
pub mod look;
pub mod tuning;
