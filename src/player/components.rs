use bevy::prelude::*;

/// Marker component for the player body entity.
#[derive(Component)]
pub struct Player;

/// Velocity component for physics-based movement.
#[derive(Component, Default)]
pub struct Velocity(pub Vec3);

/// Who currently drives the player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    FirstPersonMode,
    #[default]
    ThirdPersonMode,
    /// Character ignores input; the cursor belongs to a menu or the chat box.
    Disabled,
}

/// Control state of the player character, shared with the camera.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerCharacterController {
    pub state: ControllerState,
    /// State to return to when control is handed back.
    pub previous_state: ControllerState,
}

impl PlayerCharacterController {
    pub fn new(state: ControllerState) -> Self {
        Self {
            state,
            previous_state: state,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.state == ControllerState::Disabled
    }

    /// Saves the current state and disables the character.
    pub fn suspend(&mut self) {
        if self.is_disabled() {
            return;
        }
        self.previous_state = self.state;
        self.state = ControllerState::Disabled;
    }

    /// Restores the state saved by the last [`suspend`](Self::suspend).
    pub fn resume(&mut self) {
        self.state = self.previous_state;
    }
}

/// Point the first person camera sits at.
#[derive(Component)]
pub struct HeadAnchor;

/// Point the first person camera looks toward when it attaches to the head.
#[derive(Component)]
pub struct LookTargetAnchor;

/// Point the third person camera orbits around.
#[derive(Component)]
pub struct OrbitTarget;

// Player physics constants
pub const PLAYER_SPEED: f32 = 5.0;
pub const JUMP_VELOCITY: f32 = 8.0;
pub const GRAVITY: f32 = 20.0;
/// Body origin is its center, so it rests this far above the ground.
pub const PLAYER_HALF_HEIGHT: f32 = 0.9;
pub const GROUND_LEVEL: f32 = 0.0;

// Anchor offsets relative to the body origin
pub const HEAD_OFFSET: Vec3 = Vec3::new(0.0, 0.7, -0.1);
pub const LOOK_TARGET_OFFSET: Vec3 = Vec3::new(0.0, 0.7, -1.5);
pub const ORBIT_TARGET_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspend_then_resume_restores_state() {
        let mut controller = PlayerCharacterController::new(ControllerState::FirstPersonMode);
        controller.suspend();
        assert!(controller.is_disabled());
        assert_eq!(controller.previous_state, ControllerState::FirstPersonMode);
        controller.resume();
        assert_eq!(controller.state, ControllerState::FirstPersonMode);
    }

    #[test]
    fn double_suspend_keeps_saved_state() {
        let mut controller = PlayerCharacterController::new(ControllerState::ThirdPersonMode);
        controller.suspend();
        controller.suspend();
        controller.resume();
        assert_eq!(controller.state, ControllerState::ThirdPersonMode);
    }
}
