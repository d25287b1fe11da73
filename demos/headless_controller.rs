use bevy::app::ScheduleRunnerPlugin;
use bevy::diagnostic::FrameCount;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_player_controller::prelude::*;
use std::time::Duration;

fn main() {
    println!("Starting headless controller run...");
    println!("Scripted input: walk, run, jump mid-run, stop.");

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))))
        .add_plugins(ControllerCorePlugin)
        .init_resource::<ButtonInput<KeyCode>>()
        .add_systems(Startup, setup)
        .add_systems(First, script_input)
        .add_systems(Update, report.after(ControllerSystems::Frame))
        .run();
}

fn setup(mut commands: Commands) {
    let camera = commands.spawn(Transform::from_xyz(0.0, 0.6, 0.0)).id();
    commands.spawn((presets::merged(camera), Name::new("Scripted Player")));
}

/// Press and release keys on fixed frames.
fn script_input(frames: Res<FrameCount>, mut keyboard: ResMut<ButtonInput<KeyCode>>) {
    keyboard.clear();
    match frames.0 {
        10 => keyboard.press(KeyCode::KeyW),
        60 => keyboard.press(KeyCode::ShiftLeft),
        90 => keyboard.press(KeyCode::Space),
        91 => keyboard.release(KeyCode::Space),
        100 => keyboard.press(KeyCode::Space), // refused, still airborne
        101 => keyboard.release(KeyCode::Space),
        180 => keyboard.release(KeyCode::ShiftLeft),
        240 => keyboard.release(KeyCode::KeyW),
        300 => {
            println!("[FINISHED] Run complete.");
            std::process::exit(0);
        }
        _ => {}
    }
}

fn report(
    mut changes: MessageReader<LocomotionChanged>,
    mut jumps: MessageReader<JumpEvent>,
    mut landings: MessageReader<LandedEvent>,
    player: Query<(&Transform, &PlayerController)>,
    frames: Res<FrameCount>,
) {
    let Ok((transform, controller)) = player.single() else {
        return;
    };
    for change in changes.read() {
        println!(
            "[{:>3}] {:?} -> {:?} (speed {:.1}, z {:.2})",
            frames.0, change.from, change.to, controller.current_speed, transform.translation.z
        );
    }
    for _ in jumps.read() {
        println!("[{:>3}] jump", frames.0);
    }
    for landed in landings.read() {
        println!("[{:>3}] landed into {}", frames.0, landed.trigger.name());
    }
}
