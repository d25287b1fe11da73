//! # Bevy Player Controller
//!
//! First/third-person character controller plugin for Bevy 0.18.
//!
//! ## Features
//! - Keyboard and mouse sampling into a per-entity input component
//! - Mouse look with clamped camera pitch and body yaw
//! - Kinematic or velocity-driven locomotion at the fixed physics step
//! - Walk/run animation trigger state machine with run speed boost
//! - Jump lock-out with timed recovery and landing trigger selection
//! - One-shot jump audio and an `AnimationPlayer` bridge
//! - Serializable tuning profiles
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_player_controller::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PlayerControllerPluginGroup)
//!         .add_systems(Startup, spawn_player)
//!         .run();
//! }
//!
//! fn spawn_player(mut commands: Commands) {
//!     let camera = commands.spawn((Camera3d::default(), Transform::from_xyz(0.0, 1.6, 0.0))).id();
//!     commands
//!         .spawn((presets::merged(camera), Transform::from_xyz(0.0, 1.0, 0.0)))
//!         .add_child(camera);
//! }
//! ```

pub mod components;
pub mod events;
pub mod presets;
pub mod resources;
pub mod systems;
pub mod types;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::presets;
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::ControllerSystems;
    pub use crate::PlayerControllerPluginGroup;
    pub use crate::{
        ControllerAnimationPlugin, ControllerAudioPlugin, ControllerCorePlugin, ControllerDebugPlugin,
    };
}

use bevy::prelude::*;

/// System sets of the controller, for ordering application systems around them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControllerSystems {
    /// Per-frame work in `Update`: input, locomotion, jump, look
    Frame,
    /// Per-physics-step work in `FixedUpdate`: turning and movement
    Physics,
}

/// Main plugin group that includes all controller subsystems.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_player_controller::prelude::*;
///
/// fn main() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(PlayerControllerPluginGroup);
/// }
/// ```
#[derive(Default)]
pub struct PlayerControllerPluginGroup;

impl PluginGroup for PlayerControllerPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(ControllerCorePlugin)
            .add(ControllerAnimationPlugin)
            .add(ControllerAudioPlugin)
            .add(ControllerDebugPlugin)
    }
}

/// Core controller plugin (input, look, locomotion, jump).
///
/// # Systems
/// - `sample_controller_input` - Keyboard/mouse into `ControllerInput`, when keyboard input exists
/// - `update_locomotion` - Walk/run trigger state machine
/// - `turn_with_keys` - Constant-rate key turning
/// - `handle_jump_input` / `update_jump_recovery` - Jump lock-out and landing
/// - `apply_mouse_look` - Pitch and yaw
/// - `end_input_frame` - Clears one-frame input signals
/// - `turn_with_axis` / `move_kinematic` - Physics-step movement
/// - `drive_velocity` / `apply_jump_impulse` - Rigid-body movement (`dim3`)
pub struct ControllerCorePlugin;

impl Plugin for ControllerCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::PlayerController>()
            .register_type::<components::ControllerInput>()
            .register_type::<components::MouseLook>()
            .register_type::<components::Locomotion>()
            .register_type::<components::Jump>()
            .register_type::<components::JumpSound>()
            .register_type::<components::AnimationTriggers>()
            .register_type::<resources::ControllerConfig>()
            .register_type::<resources::ControllerBindings>()
            .init_resource::<resources::ControllerConfig>()
            .init_resource::<resources::ControllerBindings>()
            .add_message::<events::JumpEvent>()
            .add_message::<events::LandedEvent>()
            .add_message::<events::LocomotionChanged>()
            .configure_sets(Update, ControllerSystems::Frame)
            .configure_sets(FixedUpdate, ControllerSystems::Physics)
            .add_systems(Startup, systems::input::lock_cursor)
            .add_systems(
                Update,
                systems::tuning::apply_tuning
                    .run_if(resource_exists_and_changed::<resources::ControllerTuning>)
                    .before(ControllerSystems::Frame),
            )
            .add_systems(
                Update,
                (
                    systems::input::sample_controller_input
                        .run_if(resource_exists::<ButtonInput<KeyCode>>),
                    systems::locomotion::update_locomotion,
                    systems::locomotion::turn_with_keys,
                    systems::jump::handle_jump_input,
                    systems::jump::update_jump_recovery,
                    systems::look::apply_mouse_look,
                    systems::input::end_input_frame,
                )
                    .chain()
                    .in_set(ControllerSystems::Frame),
            )
            .add_systems(
                Update,
                systems::input::toggle_cursor_lock.run_if(
                    resource_exists::<ButtonInput<KeyCode>>
                        .and(resource_exists::<ButtonInput<MouseButton>>),
                ),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::locomotion::turn_with_axis,
                    systems::locomotion::move_kinematic,
                )
                    .chain()
                    .in_set(ControllerSystems::Physics),
            );

        // Rigid-body systems
        #[cfg(feature = "dim3")]
        {
            app.add_systems(
                FixedUpdate,
                (
                    systems::locomotion::drive_velocity,
                    systems::jump::apply_jump_impulse,
                )
                    .chain()
                    .in_set(ControllerSystems::Physics)
                    .after(systems::locomotion::move_kinematic),
            );
        }
    }
}

/// Animation bridge plugin.
///
/// Plays the graph node bound in `AnimationClipMap` when a trigger fires.
pub struct ControllerAnimationPlugin;

impl Plugin for ControllerAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::animation::drive_animation_players.after(ControllerSystems::Frame),
        );
    }
}

/// Jump audio plugin.
pub struct ControllerAudioPlugin;

impl Plugin for ControllerAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::audio::play_jump_sound.after(ControllerSystems::Frame),
        );
    }
}

/// Debug plugin for controller visualization.
pub struct ControllerDebugPlugin;

impl Plugin for ControllerDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::debug::draw_controller_debug);
    }
}
