//! Input sampling - turns keyboard and mouse state into `ControllerInput`.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::components::ControllerInput;
use crate::resources::{ControllerBindings, ControllerConfig};
use crate::types::{axis_target, MovementEdges};

/// Sample keyboard and mouse into every controller's input component.
///
/// Runs once per frame, before any system that reads `ControllerInput`.
/// The digital axes are smoothed with the frame delta so the physics step
/// sees the same ramp regardless of how often it runs.
///
/// # Arguments
/// * `time` - Frame time
/// * `keyboard` - Keyboard state
/// * `mouse_motion` - Mouse motion accumulated this frame, if the input plugin provides it
/// * `bindings` - Key bindings and axis response
/// * `inputs` - Controller inputs to fill
pub fn sample_controller_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    bindings: Res<ControllerBindings>,
    mut inputs: Query<&mut ControllerInput>,
) {
    let dt = time.delta_secs();
    let look = mouse_motion
        .map(|motion| mouse_axes(motion.delta, bindings.mouse_axis_scale))
        .unwrap_or(Vec2::ZERO);

    let edges = MovementEdges {
        forward_pressed: keyboard.just_pressed(bindings.forward),
        forward_released: keyboard.just_released(bindings.forward),
        backward_pressed: keyboard.just_pressed(bindings.backward),
        backward_released: keyboard.just_released(bindings.backward),
        run_pressed: keyboard.just_pressed(bindings.run),
        run_released: keyboard.just_released(bindings.run),
    };

    for mut input in inputs.iter_mut() {
        input.forward_held = keyboard.pressed(bindings.forward);
        input.backward_held = keyboard.pressed(bindings.backward);
        input.turn_left_held = keyboard.pressed(bindings.turn_left);
        input.turn_right_held = keyboard.pressed(bindings.turn_right);
        input.run_held = keyboard.pressed(bindings.run);
        input.edges = edges;
        input.jump_pressed = keyboard.just_pressed(bindings.jump);
        input.look = look;

        let vertical_target = axis_target(input.backward_held, input.forward_held);
        let horizontal_target = axis_target(input.turn_left_held, input.turn_right_held);
        input.vertical = input
            .vertical_axis
            .step(vertical_target, dt, &bindings.axis_response);
        input.horizontal = input
            .horizontal_axis
            .step(horizontal_target, dt, &bindings.axis_response);
    }
}

/// Drop the one-frame signals once the frame's controller systems have read them.
///
/// External writers of `ControllerInput` set edges, jumps and look deltas
/// before `ControllerSystems::Frame`; they fire exactly once.
pub fn end_input_frame(mut inputs: Query<&mut ControllerInput>) {
    for mut input in inputs.iter_mut() {
        input.clear_frame_signals();
    }
}

/// Convert a raw mouse delta (pixels, +y down) into look axes (+y up).
pub fn mouse_axes(delta: Vec2, scale: f32) -> Vec2 {
    Vec2::new(delta.x, -delta.y) * scale
}

/// Lock and hide the cursor on the primary window.
pub fn lock_cursor(
    config: Res<ControllerConfig>,
    mut windows: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !config.lock_cursor {
        return;
    }
    let Ok(mut cursor) = windows.single_mut() else {
        return;
    };
    cursor.visible = false;
    cursor.grab_mode = CursorGrabMode::Locked;
    info!("Cursor locked to the primary window");
}

/// Release the cursor on the release key and lock it again on left click.
pub fn toggle_cursor_lock(
    config: Res<ControllerConfig>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut windows: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !config.lock_cursor {
        return;
    }
    let Ok(mut cursor) = windows.single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode != CursorGrabMode::Locked {
        cursor.visible = false;
        cursor.grab_mode = CursorGrabMode::Locked;
        debug!("Cursor locked");
    }

    if let Some(key) = config.release_cursor_key {
        if keyboard.just_pressed(key) {
            cursor.visible = true;
            cursor.grab_mode = CursorGrabMode::None;
            debug!("Cursor released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_axes_flip_vertical() {
        let axes = mouse_axes(Vec2::new(10.0, 20.0), 0.1);
        assert!((axes.x - 1.0).abs() < 1e-6);
        assert!((axes.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_sampler_reports_edges_and_held_keys() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ControllerBindings>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, sample_controller_input);

        let entity = app.world_mut().spawn(ControllerInput::default()).id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);
        app.update();

        let input = app.world().get::<ControllerInput>(entity).unwrap();
        assert!(input.forward_held);
        assert!(input.edges.forward_pressed);
        assert!(!input.edges.forward_released);
        assert!(!input.jump_pressed);
        assert_eq!(input.look, Vec2::ZERO);

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.clear();
        keyboard.release(KeyCode::KeyW);
        app.update();

        let input = app.world().get::<ControllerInput>(entity).unwrap();
        assert!(!input.forward_held);
        assert!(input.edges.forward_released);
        assert!(!input.edges.forward_pressed);
    }
}
