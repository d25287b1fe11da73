//! Global resources for the controller.

use std::time::{Duration, TryFromFloatSecsError};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{Jump, JumpSound, Locomotion, MouseLook, PlayerController};
use crate::types::{AxisResponse, RunBoost};

/// Global configuration for the controller plugins.
///
/// # Fields
/// * `lock_cursor` - Lock and hide the cursor on the primary window at startup
/// * `release_cursor_key` - Key that releases the cursor (left click locks it again)
/// * `debug_draw` - Draw gizmos for controller state
///
/// # Example
/// ```
/// use bevy_player_controller::resources::ControllerConfig;
///
/// let config = ControllerConfig {
///     debug_draw: true,
///     ..Default::default()
/// };
/// assert!(config.lock_cursor);
/// ```
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct ControllerConfig {
    pub lock_cursor: bool,
    pub release_cursor_key: Option<KeyCode>,
    pub debug_draw: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            lock_cursor: true,
            release_cursor_key: Some(KeyCode::Escape),
            debug_draw: false,
        }
    }
}

/// Key bindings and axis shaping used by the keyboard sampler.
///
/// # Fields
/// * `forward` / `backward` - Keys of the vertical axis and the walk edges
/// * `turn_left` / `turn_right` - Keys of the horizontal axis
/// * `run` - Hold to run
/// * `jump` - Jump button
/// * `mouse_axis_scale` - Mouse pixels to axis units
/// * `axis_response` - Smoothing of the digital axes
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct ControllerBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub run: KeyCode,
    pub jump: KeyCode,
    pub mouse_axis_scale: f32,
    pub axis_response: AxisResponse,
}

impl Default for ControllerBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            turn_left: KeyCode::KeyA,
            turn_right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            mouse_axis_scale: 0.1,
            axis_response: AxisResponse::default(),
        }
    }
}

/// Serializable tuning profile shared by all controllers.
///
/// Inserting or changing this resource pushes the values onto every
/// controller (see `systems::tuning::apply_tuning`). Profiles can be stored
/// and loaded with [`ControllerTuning::encode`] and [`ControllerTuning::decode`].
///
/// # Example
/// ```
/// use bevy_player_controller::resources::ControllerTuning;
///
/// let tuning = ControllerTuning::default();
/// let bytes = tuning.encode().unwrap();
/// assert_eq!(ControllerTuning::decode(&bytes).unwrap(), tuning);
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerTuning {
    pub base_speed: f32,
    pub backward_speed: f32,
    pub rotation_speed: f32,
    pub run_boost: RunBoost,
    pub jump_force: f32,
    pub jump_volume: f32,
    pub jump_recovery_secs: Option<f32>,
    pub mouse_sensitivity: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            backward_speed: 1.0,
            rotation_speed: 80.0,
            run_boost: RunBoost::Multiplier(2.0),
            jump_force: 5.0,
            jump_volume: 1.0,
            jump_recovery_secs: Some(0.7),
            mouse_sensitivity: 100.0,
        }
    }
}

impl ControllerTuning {
    /// Encodes the profile with bincode.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decodes a profile written by [`ControllerTuning::encode`].
    ///
    /// Profiles whose jump recovery is not a valid duration are rejected.
    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        let tuning: Self = bincode::deserialize(bytes)?;
        tuning
            .jump_recovery()
            .map_err(|err| Box::new(bincode::ErrorKind::Custom(format!("jump_recovery_secs: {err}"))))?;
        Ok(tuning)
    }

    /// The jump recovery delay as a `Duration`.
    ///
    /// Fails for negative, NaN or overflowing seconds.
    pub fn jump_recovery(&self) -> Result<Option<Duration>, TryFromFloatSecsError> {
        self.jump_recovery_secs
            .map(Duration::try_from_secs_f32)
            .transpose()
    }

    /// Reads a profile back from a controller's components.
    ///
    /// Values of absent components keep their defaults.
    pub fn capture(
        controller: &PlayerController,
        locomotion: Option<&Locomotion>,
        jump: Option<&Jump>,
        sound: Option<&JumpSound>,
        look: Option<&MouseLook>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            base_speed: controller.base_speed,
            backward_speed: controller.backward_speed,
            rotation_speed: controller.rotation_speed,
            run_boost: locomotion.map_or(defaults.run_boost, |l| l.run_boost),
            jump_force: jump.map_or(defaults.jump_force, |j| j.force),
            jump_volume: sound.map_or(defaults.jump_volume, |s| s.volume),
            jump_recovery_secs: jump.map_or(defaults.jump_recovery_secs, |j| {
                j.recovery.map(|d| d.as_secs_f32())
            }),
            mouse_sensitivity: look.map_or(defaults.mouse_sensitivity, |l| l.sensitivity),
        }
    }

    /// Writes the profile onto a controller's components.
    ///
    /// The running bonus is recomputed from the new base speed when the
    /// controller is currently running.
    pub fn apply(
        &self,
        controller: &mut PlayerController,
        locomotion: Option<&mut Locomotion>,
        jump: Option<&mut Jump>,
        sound: Option<&mut JumpSound>,
        look: Option<&mut MouseLook>,
    ) {
        controller.base_speed = self.base_speed;
        controller.backward_speed = self.backward_speed;
        controller.rotation_speed = self.rotation_speed;
        controller.current_speed = self.base_speed;

        if let Some(locomotion) = locomotion {
            locomotion.run_boost = self.run_boost;
            if locomotion.running {
                controller.current_speed = self.run_boost.apply(self.base_speed);
            }
        }
        if let Some(jump) = jump {
            jump.force = self.jump_force;
            match self.jump_recovery() {
                Ok(recovery) => {
                    jump.recovery = recovery;
                    jump.require_grounded = recovery.is_some();
                }
                Err(err) => warn!(
                    "Ignoring jump recovery {:?}: {err}",
                    self.jump_recovery_secs
                ),
            }
        }
        if let Some(sound) = sound {
            sound.volume = self.jump_volume;
        }
        if let Some(look) = look {
            look.sensitivity = self.mouse_sensitivity;
        }
    }
}
