//! Headless app tests driving the controller plugins with scripted input.

use std::time::Duration;

use bevy::audio::{PlaybackMode, Volume};
use bevy::ecs::message::MessageReader;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_player_controller::prelude::*;
use bevy_player_controller::systems::look::pitch_rotation;

#[derive(Resource, Default)]
struct Counters {
    jumps: usize,
    landings: Vec<AnimationTrigger>,
}

fn count_messages(
    mut jumps: MessageReader<JumpEvent>,
    mut landings: MessageReader<LandedEvent>,
    mut counters: ResMut<Counters>,
) {
    counters.jumps += jumps.read().count();
    for landed in landings.read() {
        counters.landings.push(landed.trigger);
    }
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins((ControllerCorePlugin, ControllerAudioPlugin));
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<Counters>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    app.add_systems(Update, count_messages.after(ControllerSystems::Frame));
    app
}

fn step(app: &mut App) {
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

fn steps(app: &mut App, count: usize) {
    for _ in 0..count {
        step(app);
    }
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

fn spawn_merged(app: &mut App) -> (Entity, Entity) {
    let camera = app.world_mut().spawn(Transform::from_xyz(0.0, 0.6, 0.0)).id();
    let player = app
        .world_mut()
        .spawn((presets::merged(camera), Transform::from_xyz(0.0, 1.0, 0.0)))
        .id();
    (player, camera)
}

#[test]
fn test_holding_forward_moves_along_heading() {
    let mut app = test_app();
    let (player, _) = spawn_merged(&mut app);
    step(&mut app);

    press(&mut app, KeyCode::KeyW);
    steps(&mut app, 30);

    let transform = app.world().get::<Transform>(player).unwrap();
    assert!(transform.translation.z < -0.05, "moved {:?}", transform.translation);
    assert!(transform.translation.x.abs() < 1e-4);
    assert!((transform.translation.y - 1.0).abs() < 1e-4);

    let locomotion = app.world().get::<Locomotion>(player).unwrap();
    assert_eq!(locomotion.state, LocomotionState::WalkForward);
    assert!(locomotion.walking);
}

#[test]
fn test_run_multiplies_and_release_restores_speed() {
    let mut app = test_app();
    let (player, _) = spawn_merged(&mut app);
    step(&mut app);

    press(&mut app, KeyCode::KeyW);
    step(&mut app);
    press(&mut app, KeyCode::ShiftLeft);
    step(&mut app);

    let controller = app.world().get::<PlayerController>(player).unwrap();
    assert_eq!(controller.current_speed, 2.0);
    let triggers = app.world().get::<AnimationTriggers>(player).unwrap();
    assert_eq!(triggers.latest(), Some(AnimationTrigger::RunForward));

    release(&mut app, KeyCode::ShiftLeft);
    step(&mut app);

    let controller = app.world().get::<PlayerController>(player).unwrap();
    assert_eq!(controller.current_speed, controller.base_speed);
    assert_eq!(
        app.world().get::<Locomotion>(player).unwrap().state,
        LocomotionState::WalkForward
    );
}

#[test]
fn test_pitch_stays_clamped_under_large_mouse_motion() {
    let mut app = test_app();
    let (player, camera) = spawn_merged(&mut app);
    app.insert_resource(AccumulatedMouseMotion {
        delta: Vec2::new(0.0, -10_000.0),
    });
    steps(&mut app, 20);

    let look = app.world().get::<MouseLook>(player).unwrap();
    assert_eq!(look.pitch, 90.0);
    let camera_rotation = app.world().get::<Transform>(camera).unwrap().rotation;
    assert!(camera_rotation.angle_between(pitch_rotation(90.0)) < 1e-4);

    app.insert_resource(AccumulatedMouseMotion {
        delta: Vec2::new(0.0, 10_000.0),
    });
    steps(&mut app, 20);

    let look = app.world().get::<MouseLook>(player).unwrap();
    assert_eq!(look.pitch, -90.0);
}

#[test]
fn test_horizontal_mouse_motion_yaws_body_not_camera() {
    let mut app = test_app();
    let (player, camera) = spawn_merged(&mut app);
    app.insert_resource(AccumulatedMouseMotion {
        delta: Vec2::new(5.0, 0.0),
    });
    steps(&mut app, 5);

    let forward = app.world().get::<Transform>(player).unwrap().forward();
    assert!(forward.x > 0.0, "body should turn right, forward {forward:?}");
    let camera_rotation = app.world().get::<Transform>(camera).unwrap().rotation;
    assert!(camera_rotation.angle_between(Quat::IDENTITY) < 1e-4);
}

#[test]
fn test_jump_while_airborne_is_ignored() {
    let mut app = test_app();
    let (player, _) = spawn_merged(&mut app);
    step(&mut app);

    press(&mut app, KeyCode::Space);
    step(&mut app);
    release(&mut app, KeyCode::Space);
    step(&mut app);
    press(&mut app, KeyCode::Space);
    step(&mut app);

    assert_eq!(app.world().resource::<Counters>().jumps, 1);
    let jump = app.world().get::<Jump>(player).unwrap();
    assert!(!jump.grounded);
    let triggers = app.world().get::<AnimationTriggers>(player).unwrap();
    assert!(triggers.is_set(AnimationTrigger::JumpUp));

    release(&mut app, KeyCode::Space);
    steps(&mut app, 60);

    let jump = app.world().get::<Jump>(player).unwrap();
    assert!(jump.grounded);

    press(&mut app, KeyCode::Space);
    step(&mut app);
    assert_eq!(app.world().resource::<Counters>().jumps, 2);
}

#[test]
fn test_landing_trigger_matches_state_at_landing() {
    let mut app = test_app();
    let (player, _) = spawn_merged(&mut app);
    step(&mut app);

    press(&mut app, KeyCode::Space);
    step(&mut app);
    release(&mut app, KeyCode::Space);
    step(&mut app);

    // Start walking mid-air.
    press(&mut app, KeyCode::KeyW);
    step(&mut app);
    assert!(app.world().resource::<Counters>().landings.is_empty());

    steps(&mut app, 60);

    let counters = app.world().resource::<Counters>();
    assert_eq!(counters.landings, vec![AnimationTrigger::WalkForward]);
    let triggers = app.world().get::<AnimationTriggers>(player).unwrap();
    assert_eq!(triggers.latest(), Some(AnimationTrigger::WalkForward));
    assert!(!triggers.is_set(AnimationTrigger::JumpUp));
    assert_eq!(
        app.world().get::<Locomotion>(player).unwrap().state,
        LocomotionState::WalkForward
    );
}

#[test]
fn test_jump_sound_plays_only_with_clip() {
    let mut app = test_app();
    let (silent, _) = spawn_merged(&mut app);
    let camera = app.world_mut().spawn(Transform::default()).id();
    let loud = app
        .world_mut()
        .spawn(presets::basic_mover(camera))
        .insert(JumpSound::new(Handle::default()).with_volume(0.5))
        .id();
    step(&mut app);

    press(&mut app, KeyCode::Space);
    steps(&mut app, 2);

    assert_eq!(app.world().resource::<Counters>().jumps, 2);
    let sounds: Vec<PlaybackSettings> = app
        .world_mut()
        .query_filtered::<&PlaybackSettings, With<AudioPlayer>>()
        .iter(app.world())
        .cloned()
        .collect();
    assert_eq!(sounds.len(), 1);
    assert!(matches!(sounds[0].mode, PlaybackMode::Despawn));
    assert_eq!(sounds[0].volume.to_linear(), Volume::Linear(0.5).to_linear());
    assert!(app.world().get::<Jump>(silent).is_some());
    assert!(app.world().get::<Jump>(loud).unwrap().grounded);
}

#[test]
fn test_external_input_drives_controller_without_keyboard() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(ControllerCorePlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));

    let player = app
        .world_mut()
        .spawn((
            PlayerController::new(3.0),
            ControllerInput {
                vertical: 1.0,
                ..Default::default()
            },
        ))
        .id();
    for _ in 0..30 {
        app.update();
    }

    let transform = app.world().get::<Transform>(player).unwrap();
    assert!(transform.translation.z < -0.5, "moved {:?}", transform.translation);
}

#[test]
fn test_external_jump_request_fires_once() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(ControllerCorePlugin);
    app.init_resource::<Counters>();
    app.add_systems(Update, count_messages.after(ControllerSystems::Frame));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));

    let camera = app.world_mut().spawn(Transform::default()).id();
    let player = app.world_mut().spawn(presets::merged(camera)).id();
    app.update();

    {
        let mut input = app.world_mut().get_mut::<ControllerInput>(player).unwrap();
        input.jump_pressed = true;
        input.edges.forward_pressed = true;
    }
    app.update();

    let input = app.world().get::<ControllerInput>(player).unwrap();
    assert!(!input.jump_pressed);
    assert!(input.edges.is_empty());

    // Several recovery periods.
    for _ in 0..240 {
        app.update();
    }
    assert_eq!(app.world().resource::<Counters>().jumps, 1);
    assert_eq!(app.world().resource::<Counters>().landings.len(), 1);
    assert!(app.world().get::<Jump>(player).unwrap().grounded);
}

#[test]
fn test_jump_without_recovery_keeps_locomotion_state() {
    let mut app = test_app();
    let camera = app.world_mut().spawn(Transform::default()).id();
    let player = app
        .world_mut()
        .spawn((
            presets::basic_mover(camera),
            Locomotion::new(LocomotionStyle::Unified, RunBoost::Multiplier(2.0)),
        ))
        .id();
    step(&mut app);

    press(&mut app, KeyCode::KeyW);
    step(&mut app);
    press(&mut app, KeyCode::Space);
    step(&mut app);

    assert_eq!(app.world().resource::<Counters>().jumps, 1);
    assert_eq!(
        app.world().get::<Locomotion>(player).unwrap().state,
        LocomotionState::WalkForward
    );
    let triggers = app.world().get::<AnimationTriggers>(player).unwrap();
    assert!(!triggers.is_set(AnimationTrigger::JumpUp));
}

#[test]
fn test_tuning_resource_updates_controllers() {
    let mut app = test_app();
    let (player, _) = spawn_merged(&mut app);
    step(&mut app);

    app.insert_resource(ControllerTuning {
        base_speed: 4.0,
        mouse_sensitivity: 20.0,
        jump_recovery_secs: None,
        ..Default::default()
    });
    step(&mut app);

    let controller = app.world().get::<PlayerController>(player).unwrap();
    assert_eq!(controller.base_speed, 4.0);
    assert_eq!(controller.current_speed, 4.0);
    assert_eq!(app.world().get::<MouseLook>(player).unwrap().sensitivity, 20.0);
    let jump = app.world().get::<Jump>(player).unwrap();
    assert!(!jump.require_grounded);
}

#[cfg(feature = "dim3")]
mod rigid_body {
    use super::*;
    use avian3d::prelude::LinearVelocity;

    #[test]
    fn test_velocity_drive_sets_horizontal_velocity_only() {
        let mut app = test_app();
        let player = app
            .world_mut()
            .spawn((presets::walk_run(), LinearVelocity(Vec3::new(0.0, -1.0, 0.0))))
            .id();
        step(&mut app);

        press(&mut app, KeyCode::KeyW);
        steps(&mut app, 10);

        let velocity = app.world().get::<LinearVelocity>(player).unwrap().0;
        assert!((velocity.z + 2.0).abs() < 1e-4, "velocity {velocity:?}");
        assert_eq!(velocity.y, -1.0);

        press(&mut app, KeyCode::ShiftLeft);
        steps(&mut app, 10);
        let velocity = app.world().get::<LinearVelocity>(player).unwrap().0;
        assert!((velocity.z + 4.0).abs() < 1e-4, "velocity {velocity:?}");
    }

    #[test]
    fn test_jump_impulse_is_applied_once() {
        let mut app = test_app();
        let (player, _) = spawn_merged(&mut app);
        app.world_mut()
            .entity_mut(player)
            .insert(LinearVelocity::default());
        step(&mut app);

        press(&mut app, KeyCode::Space);
        steps(&mut app, 10);

        let velocity = app.world().get::<LinearVelocity>(player).unwrap().0;
        assert_eq!(velocity.y, 5.0);
        assert_eq!(app.world().get::<Jump>(player).unwrap().pending_impulse, 0.0);
    }
}
