//! Chat box: takes the cursor while typing and prints sent lines to the console.

use bevy::{
    input::{
        keyboard::{Key, KeyboardInput},
        ButtonState,
    },
    prelude::*,
};

use crate::camera::{cursor::CursorLock, CameraInputSet};
use crate::character::CharacterData;
use crate::console::Console;
use crate::game_state::AppState;
use crate::player::{Player, PlayerCharacterController};

/// Longest message the chat box accepts.
const MAX_MESSAGE_LEN: usize = 120;

#[derive(Resource, Debug, Default)]
pub struct ChatInput {
    open: bool,
    buffer: String,
}

impl ChatInput {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    fn push_str(&mut self, text: &str) {
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            if self.buffer.chars().count() >= MAX_MESSAGE_LEN {
                break;
            }
            self.buffer.push(ch);
        }
    }

    /// Closes the box, returning the trimmed message if there is one.
    fn take(&mut self) -> Option<String> {
        self.open = false;
        let message = std::mem::take(&mut self.buffer);
        let message = message.trim();
        (!message.is_empty()).then(|| message.to_string())
    }
}

/// Marker for the chat line UI node.
#[derive(Component)]
pub struct ChatLine;

pub struct ChatPlugin;

impl Plugin for ChatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChatInput>()
            .add_systems(OnEnter(AppState::InGame), setup_chat_line)
            .add_systems(OnExit(AppState::InGame), cleanup_chat_line)
            .add_systems(
                Update,
                (chat_input, sync_chat_line)
                    .chain()
                    .before(CameraInputSet)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/// Enter opens the chat box, typing fills it and Enter again sends it.
pub fn chat_input(
    mut keyboard_events: EventReader<KeyboardInput>,
    mut chat: ResMut<ChatInput>,
    mut cursor: ResMut<CursorLock>,
    mut console: ResMut<Console>,
    record: Option<Res<CharacterData>>,
    mut controllers: Query<&mut PlayerCharacterController, With<Player>>,
) {
    let Ok(mut controller) = controllers.get_single_mut() else {
        keyboard_events.clear();
        return;
    };

    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        if !chat.open {
            // Refused while the menu holds the cursor
            if event.logical_key == Key::Enter && cursor.acquire_for_chat(&mut controller) {
                chat.open = true;
            }
            continue;
        }

        match &event.logical_key {
            Key::Enter => {
                if let Some(message) = chat.take() {
                    let name = record.as_ref().map_or("You", |record| record.name.as_str());
                    console.print(format!("{name}: {message}"));
                }
                cursor.release_from_chat(&mut controller);
            }
            Key::Backspace => {
                chat.buffer.pop();
            }
            Key::Space => chat.push_str(" "),
            Key::Character(text) => chat.push_str(text),
            _ => {}
        }
    }
}

fn setup_chat_line(mut commands: Commands) {
    commands.spawn((
        ChatLine,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 0.8)),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(4.0),
            padding: UiRect::axes(Val::Px(8.0), Val::Px(2.0)),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn cleanup_chat_line(mut commands: Commands, query: Query<Entity, With<ChatLine>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn sync_chat_line(chat: Res<ChatInput>, mut query: Query<(&mut Text, &mut Visibility), With<ChatLine>>) {
    if !chat.is_changed() {
        return;
    }

    for (mut text, mut visibility) in query.iter_mut() {
        if chat.is_open() {
            text.0 = format!("> {}", chat.text());
            *visibility = Visibility::Inherited;
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ControllerState;

    fn chat_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_event::<KeyboardInput>()
            .init_resource::<ChatInput>()
            .init_resource::<CursorLock>()
            .insert_resource(Console::new(4))
            .add_systems(Update, chat_input);
        let player = app
            .world_mut()
            .spawn((Player, PlayerCharacterController::new(ControllerState::ThirdPersonMode)))
            .id();
        (app, player)
    }

    fn press(app: &mut App, logical_key: Key) {
        app.world_mut().send_event(KeyboardInput {
            key_code: KeyCode::KeyA,
            logical_key,
            state: ButtonState::Pressed,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn typed_message_reaches_console() {
        let (mut app, player) = chat_app();

        press(&mut app, Key::Enter);
        app.update();
        assert!(app.world().resource::<ChatInput>().is_open());
        assert!(app.world().resource::<CursorLock>().is_chat_locked());
        assert_eq!(
            app.world().get::<PlayerCharacterController>(player).unwrap().state,
            ControllerState::Disabled
        );

        press(&mut app, Key::Character("hi".into()));
        press(&mut app, Key::Space);
        press(&mut app, Key::Character("x".into()));
        press(&mut app, Key::Backspace);
        press(&mut app, Key::Character("all".into()));
        press(&mut app, Key::Enter);
        app.update();

        assert!(!app.world().resource::<ChatInput>().is_open());
        assert!(app.world().resource::<CursorLock>().is_locked());
        assert!(app.world().resource::<Console>().lines()[0].ends_with(": You: hi all"));
        assert_eq!(
            app.world().get::<PlayerCharacterController>(player).unwrap().state,
            ControllerState::ThirdPersonMode
        );
    }

    #[test]
    fn chat_stays_closed_while_menu_holds_cursor() {
        let (mut app, _) = chat_app();
        let mut controller = PlayerCharacterController::default();
        app.world_mut().resource_mut::<CursorLock>().toggle(&mut controller);

        press(&mut app, Key::Enter);
        app.update();
        assert!(!app.world().resource::<ChatInput>().is_open());
        assert!(!app.world().resource::<CursorLock>().is_chat_locked());
    }

    #[test]
    fn empty_message_is_not_printed() {
        let (mut app, _) = chat_app();
        press(&mut app, Key::Enter);
        press(&mut app, Key::Space);
        press(&mut app, Key::Enter);
        app.update();

        assert!(app.world().resource::<Console>().lines().iter().all(String::is_empty));
        assert!(app.world().resource::<CursorLock>().is_locked());
    }
}
