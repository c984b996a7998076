use bevy::prelude::*;

use super::components::{
    Player, PlayerCharacterController, Velocity, GRAVITY, GROUND_LEVEL, JUMP_VELOCITY,
    PLAYER_HALF_HEIGHT, PLAYER_SPEED,
};
use crate::camera::PlayerCamera;
use crate::world::{ROOM_HALF_DEPTH, ROOM_HALF_WIDTH};

fn is_grounded(transform: &Transform) -> bool {
    transform.translation.y <= GROUND_LEVEL + PLAYER_HALF_HEIGHT + 0.01
}

pub fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&Transform, &PlayerCharacterController, &mut Velocity), With<Player>>,
    camera_query: Query<&Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let Ok((transform, controller, mut velocity)) = query.get_single_mut() else {
        return;
    };

    if controller.is_disabled() {
        velocity.0.x = 0.0;
        velocity.0.z = 0.0;
        return;
    }

    // Get movement direction from WASD
    let mut direction = Vec3::ZERO;

    if keyboard_input.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }

    // Normalize diagonal movement
    if direction.length() > 0.0 {
        direction = direction.normalize();
    }

    // Move relative to where the camera faces (only yaw), falling back to the body
    let forward = camera_query
        .get_single()
        .map(|camera| camera.forward())
        .unwrap_or_else(|_| transform.forward());
    let forward_flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right_flat = Vec3::new(-forward.z, 0.0, forward.x).normalize_or_zero();

    let move_direction = forward_flat * -direction.z + right_flat * direction.x;

    // Set horizontal velocity
    velocity.0.x = move_direction.x * PLAYER_SPEED;
    velocity.0.z = move_direction.z * PLAYER_SPEED;

    // Jump (only when grounded)
    if keyboard_input.just_pressed(KeyCode::Space) && is_grounded(transform) {
        velocity.0.y = JUMP_VELOCITY;
    }
}

pub fn apply_gravity(
    time: Res<Time>,
    mut query: Query<(&Transform, &PlayerCharacterController, &mut Velocity), With<Player>>,
) {
    for (transform, controller, mut velocity) in query.iter_mut() {
        if !controller.is_disabled() && !is_grounded(transform) {
            velocity.0.y -= GRAVITY * time.delta_secs();
        }
    }
}

pub fn apply_velocity(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &PlayerCharacterController, &mut Velocity), With<Player>>,
) {
    for (mut transform, controller, mut velocity) in query.iter_mut() {
        // Suspended bodies hold their pose and vertical velocity until resumed
        if controller.is_disabled() {
            continue;
        }

        // Apply velocity to position
        transform.translation += velocity.0 * time.delta_secs();

        // Ground collision
        if transform.translation.y < GROUND_LEVEL + PLAYER_HALF_HEIGHT {
            transform.translation.y = GROUND_LEVEL + PLAYER_HALF_HEIGHT;
            velocity.0.y = 0.0;
        }

        // Wall collisions (keep player inside room)
        transform.translation.x = transform.translation.x.clamp(-ROOM_HALF_WIDTH, ROOM_HALF_WIDTH);
        transform.translation.z = transform.translation.z.clamp(-ROOM_HALF_DEPTH, ROOM_HALF_DEPTH);
    }
}
