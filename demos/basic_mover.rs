use bevy::{color::palettes::tailwind, prelude::*};
use bevy_player_controller::prelude::*;
use avian3d::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(PlayerControllerPluginGroup)
        .add_systems(Startup, setup)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    // First-person camera at eye height
    let camera = commands
        .spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.7, 0.0)))
        .id();

    commands
        .spawn((
            presets::basic_mover(camera),
            JumpSound::new(asset_server.load("sounds/jump.ogg")),
            Transform::from_xyz(0.0, 1.0, 5.0),
            RigidBody::Dynamic,
            Collider::capsule(0.4, 1.0),
            LockedAxes::ROTATION_LOCKED,
        ))
        .add_child(camera);

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60.0, 60.0))),
        MeshMaterial3d(materials.add(Color::from(tailwind::SLATE_700))),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    let pillar = meshes.add(Cuboid::new(1.0, 4.0, 1.0));
    let pillar_material = materials.add(Color::from(tailwind::GRAY_400));
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        commands.spawn((
            Mesh3d(pillar.clone()),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_xyz(angle.cos() * 10.0, 2.0, angle.sin() * 10.0),
            RigidBody::Static,
            Collider::cuboid(1.0, 4.0, 1.0),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
