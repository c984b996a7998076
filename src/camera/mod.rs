pub mod cursor;
pub mod input;
pub mod rig;
pub mod systems;

use bevy::{prelude::*, transform::TransformSystem};

pub use cursor::CursorLock;
pub use input::MouseAxes;
pub use rig::{CameraAnchors, PlayerCamera};

use crate::game_state::AppState;
use cursor::{apply_cursor_lock, center_cursor, toggle_cursor_lock};
use input::read_mouse_axes;
use systems::{update_camera, verify_camera_rig};

/// Input phase of the camera, run in `Update` before anything reads the axes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraInputSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorLock>()
            .init_resource::<MouseAxes>()
            .add_systems(
                OnEnter(AppState::InGame),
                verify_camera_rig.after(crate::world::setup::setup_world),
            )
            .add_systems(
                Update,
                (read_mouse_axes, toggle_cursor_lock)
                    .chain()
                    .in_set(CameraInputSet)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (apply_cursor_lock, center_cursor)
                    .chain()
                    .after(CameraInputSet)
                    .run_if(in_state(AppState::InGame)),
            )
            // Camera pose is set once per frame after gameplay has moved the body
            .add_systems(
                PostUpdate,
                update_camera
                    .before(TransformSystem::TransformPropagate)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
