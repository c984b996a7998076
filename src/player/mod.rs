pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{
    ControllerState, HeadAnchor, LookTargetAnchor, OrbitTarget, Player, PlayerCharacterController,
    Velocity, HEAD_OFFSET, LOOK_TARGET_OFFSET, ORBIT_TARGET_OFFSET, PLAYER_HALF_HEIGHT,
};

use crate::game_state::AppState;
use systems::{apply_gravity, apply_velocity, player_movement};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (player_movement, apply_gravity, apply_velocity)
                .chain()
                .run_if(in_state(AppState::InGame)),
        );
    }
}
