use bevy::prelude::*;

use crate::camera::rig::orbit_rotation;
use crate::camera::{CameraAnchors, PlayerCamera};
use crate::character::CharacterData;
use crate::player::{
    ControllerState, HeadAnchor, LookTargetAnchor, OrbitTarget, Player, PlayerCharacterController,
    Velocity, HEAD_OFFSET, LOOK_TARGET_OFFSET, ORBIT_TARGET_OFFSET, PLAYER_HALF_HEIGHT,
};
use crate::settings::CameraSettings;

use super::{ROOM_DEPTH, ROOM_HALF_DEPTH, ROOM_HALF_WIDTH, ROOM_HEIGHT, ROOM_WIDTH, WALL_THICKNESS};

/// Initial downward tilt of the orbit camera, in degrees.
const START_PITCH: f32 = 15.0;

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    record: Res<CharacterData>,
    camera_settings: Res<CameraSettings>,
) {
    // Materials
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.35, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.7),
        ..default()
    });
    let body_material = materials.add(StandardMaterial {
        base_color: if record.is_male {
            Color::srgb(0.3, 0.45, 0.8)
        } else {
            Color::srgb(0.8, 0.35, 0.5)
        },
        ..default()
    });

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ROOM_WIDTH, ROOM_DEPTH))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Walls, no ceiling so the orbit camera can rise above them
    let walls = [
        (Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS), Vec3::new(0.0, ROOM_HEIGHT / 2.0, -ROOM_DEPTH / 2.0)),
        (Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS), Vec3::new(0.0, ROOM_HEIGHT / 2.0, ROOM_DEPTH / 2.0)),
        (Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH), Vec3::new(-ROOM_WIDTH / 2.0, ROOM_HEIGHT / 2.0, 0.0)),
        (Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH), Vec3::new(ROOM_WIDTH / 2.0, ROOM_HEIGHT / 2.0, 0.0)),
    ];
    for (size, position) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Player body, kept inside the room
    let spawn = record.spawn_position();
    let body_position = Vec3::new(
        spawn.x.clamp(-ROOM_HALF_WIDTH, ROOM_HALF_WIDTH),
        spawn.y.max(PLAYER_HALF_HEIGHT),
        spawn.z.clamp(-ROOM_HALF_DEPTH, ROOM_HALF_DEPTH),
    );
    let body = commands
        .spawn((
            Player,
            Name::new(record.name.clone()),
            record.clone(),
            PlayerCharacterController::new(ControllerState::ThirdPersonMode),
            Velocity::default(),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.2))),
            MeshMaterial3d(body_material),
            Transform::from_translation(body_position),
        ))
        .id();

    let head = commands.spawn((HeadAnchor, Transform::from_translation(HEAD_OFFSET))).id();
    let look_target = commands
        .spawn((LookTargetAnchor, Transform::from_translation(LOOK_TARGET_OFFSET)))
        .id();
    let orbit_target = commands
        .spawn((OrbitTarget, Transform::from_translation(ORBIT_TARGET_OFFSET)))
        .id();
    commands.entity(body).add_children(&[head, look_target, orbit_target]);

    // Player camera, starting behind the body
    let camera = PlayerCamera::from_rotation(camera_settings.start_distance, orbit_rotation(START_PITCH, 0.0));
    let start_pose = camera.orbit_pose(body_position + ORBIT_TARGET_OFFSET);
    commands.spawn((
        camera,
        CameraAnchors {
            body,
            head,
            look_target,
            orbit_target,
        },
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera_settings.third_person_fov.to_radians(),
            ..default()
        }),
        start_pose,
    ));
}
