use bevy::{
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

use crate::player::{Player, PlayerCharacterController};

/// Who owns the mouse cursor.
///
/// The cursor starts locked to the game. Escape hands it to the player's menu
/// (the internal lock); the chat box can take it too, and while it holds the
/// cursor Escape does nothing.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CursorLock {
    locked: bool,
    internal_lock: bool,
    chat_lock: bool,
}

impl Default for CursorLock {
    fn default() -> Self {
        Self {
            locked: true,
            internal_lock: false,
            chat_lock: false,
        }
    }
}

impl CursorLock {
    /// True when mouse movement drives the camera.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True when the player unlocked the cursor with Escape.
    pub fn is_internal_locked(&self) -> bool {
        self.internal_lock
    }

    pub fn is_chat_locked(&self) -> bool {
        self.chat_lock
    }

    /// Flips between locked and unlocked. Returns false while the chat holds the cursor.
    pub fn toggle(&mut self, controller: &mut PlayerCharacterController) -> bool {
        if self.chat_lock {
            return false;
        }

        self.locked = !self.locked;
        self.internal_lock = !self.locked;
        if self.locked {
            controller.resume();
        } else {
            controller.suspend();
        }
        true
    }

    /// Hands the cursor to the chat box and suspends the character.
    /// Returns false when the chat or the menu already holds the cursor.
    pub fn acquire_for_chat(&mut self, controller: &mut PlayerCharacterController) -> bool {
        if self.chat_lock || self.internal_lock {
            return false;
        }

        self.locked = false;
        self.chat_lock = true;
        controller.suspend();
        true
    }

    /// Takes the cursor back from the chat box and restores the character.
    pub fn release_from_chat(&mut self, controller: &mut PlayerCharacterController) -> bool {
        if !self.chat_lock {
            return false;
        }

        self.locked = true;
        self.chat_lock = false;
        controller.resume();
        true
    }
}

pub fn toggle_cursor_lock(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut cursor: ResMut<CursorLock>,
    mut controllers: Query<&mut PlayerCharacterController, With<Player>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }

    let Ok(mut controller) = controllers.get_single_mut() else {
        return;
    };

    if cursor.toggle(&mut controller) {
        debug!(
            "Cursor {}",
            if cursor.is_internal_locked() { "released to menu" } else { "locked" }
        );
    }
}

/// Mirrors the lock state onto the primary window.
pub fn apply_cursor_lock(
    cursor: Res<CursorLock>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !cursor.is_changed() {
        return;
    }

    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    if cursor.is_locked() {
        window.cursor_options.grab_mode = CursorGrabMode::Confined;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Keeps a confined cursor in the middle of the window so it never hits an edge.
pub fn center_cursor(cursor: Res<CursorLock>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if !cursor.is_locked() {
        return;
    }

    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    // Only center cursor when the window is focused
    if window.focused {
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    }
}
