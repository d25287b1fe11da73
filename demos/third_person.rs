use bevy::{color::palettes::tailwind, prelude::*};
use bevy_player_controller::prelude::*;
use avian3d::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(PlayerControllerPluginGroup)
        .insert_resource(ControllerConfig {
            debug_draw: true,
            ..default()
        })
        .add_systems(Startup, (spawn_player, spawn_world, spawn_lights, spawn_ui))
        .add_systems(Update, (log_locomotion, update_state_text))
        .run();
}

// --- Components ---

#[derive(Component)]
struct StateText;

// --- Startup Systems ---

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let body_mesh = meshes.add(Capsule3d::new(0.4, 1.0));
    let body_material = materials.add(Color::from(tailwind::TEAL_300));

    // Camera sits behind and above the body; mouse look pitches it.
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 1.2, 4.0),
        ))
        .id();

    commands
        .spawn((
            presets::merged(camera),
            JumpSound::new(asset_server.load("sounds/jump.ogg")).with_volume(0.8),
            Mesh3d(body_mesh),
            MeshMaterial3d(body_material),
            Transform::from_xyz(0.0, 1.5, 0.0),
            RigidBody::Dynamic,
            Collider::capsule(0.4, 1.0),
            LockedAxes::ROTATION_LOCKED,
            Name::new("Player"),
        ))
        .add_child(camera);
}

fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Floor
    let floor_mesh = meshes.add(Plane3d::default().mesh().size(100.0, 100.0));
    let floor_material = materials.add(StandardMaterial {
        base_color: tailwind::SLATE_800.into(),
        ..default()
    });
    commands.spawn((
        Mesh3d(floor_mesh),
        MeshMaterial3d(floor_material),
        Transform::default(),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    // Crates to walk around
    let crate_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let crate_material = materials.add(Color::from(tailwind::AMBER_600));
    for i in -4..4 {
        commands.spawn((
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_xyz(i as f32 * 3.0, 0.5, -8.0),
            RigidBody::Static,
            Collider::cuboid(1.0, 1.0, 1.0),
        ));
    }
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_ui(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            padding: UiRect::all(Val::Px(20.0)),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("State: Idle"),
                TextFont::from_font_size(24.0),
                TextColor(Color::WHITE),
                StateText,
            ));
            parent.spawn((
                Text::new("W/S: Walk | A/D: Turn | SHIFT: Run | SPACE: Jump | MOUSE: Look | ESC: Release cursor"),
                TextFont::from_font_size(16.0),
                TextColor(tailwind::GRAY_400.into()),
            ));
        });
}

// --- Update Systems ---

fn log_locomotion(mut changes: bevy::ecs::message::MessageReader<LocomotionChanged>) {
    for change in changes.read() {
        info!("{:?} -> {:?}", change.from, change.to);
    }
}

fn update_state_text(
    player: Single<(&Locomotion, &Jump, &PlayerController)>,
    mut text: Single<&mut Text, With<StateText>>,
) {
    let (locomotion, jump, controller) = *player;
    text.0 = format!(
        "State: {:?} | Speed: {:.1} | Grounded: {}",
        locomotion.state, controller.current_speed, jump.grounded
    );
}
