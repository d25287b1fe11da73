use bevy::{color::palettes::tailwind, prelude::*};
use bevy_player_controller::prelude::*;
use avian3d::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(PlayerControllerPluginGroup)
        .insert_resource(ControllerConfig {
            lock_cursor: false,
            debug_draw: true,
            ..default()
        })
        .add_systems(Startup, setup)
        .add_systems(Update, follow_camera)
        .run();
}

#[derive(Component)]
struct Walker;

#[derive(Component)]
struct FollowCamera;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Walker,
        presets::walk_run(),
        Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
        MeshMaterial3d(materials.add(Color::from(tailwind::ROSE_400))),
        Transform::from_xyz(0.0, 1.0, 0.0),
        RigidBody::Dynamic,
        Collider::capsule(0.4, 1.0),
        LockedAxes::ROTATION_LOCKED,
        Friction::new(0.8),
    ));

    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 6.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(80.0, 80.0))),
        MeshMaterial3d(materials.add(Color::from(tailwind::STONE_700))),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-4.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keep the overview camera trained on the walker.
fn follow_camera(
    walker: Single<&Transform, (With<Walker>, Without<FollowCamera>)>,
    mut camera: Single<&mut Transform, With<FollowCamera>>,
) {
    let target = walker.translation;
    camera.translation = target + Vec3::new(0.0, 6.0, 10.0);
    camera.look_at(target, Vec3::Y);
}
