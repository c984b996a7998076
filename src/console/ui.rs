use bevy::prelude::*;

use super::buffer::Console;
use crate::settings::ConsoleSettings;

/// Marker for the console container in the bottom-left.
#[derive(Component)]
pub struct ConsoleRoot;

/// A console text slot, holding the buffer index it mirrors.
#[derive(Component)]
pub struct ConsoleLine(pub usize);

/// Marker for the in-game UI camera.
#[derive(Component)]
pub struct InGameUICamera;

/// Sets up one text node per console slot.
pub fn setup_console_ui(mut commands: Commands, console: Res<Console>, settings: Res<ConsoleSettings>) {
    // UI camera drawn on top of the player camera
    commands.spawn((InGameUICamera, Camera2d, Camera { order: 1, ..default() }));

    commands
        .spawn((
            ConsoleRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                // Slot 0 is the newest line and sits at the bottom
                flex_direction: FlexDirection::ColumnReverse,
                row_gap: Val::Px(2.0),
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
        ))
        .with_children(|parent| {
            for (slot, line) in console.lines().iter().enumerate() {
                parent.spawn((
                    ConsoleLine(slot),
                    Text::new(line.clone()),
                    TextFont {
                        font_size: settings.font_size,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));
            }
        });
}

/// Cleans up the console container and UI camera.
pub fn cleanup_console_ui(
    mut commands: Commands,
    root_query: Query<Entity, With<ConsoleRoot>>,
    camera_query: Query<Entity, With<InGameUICamera>>,
) {
    for entity in root_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Copies buffer contents into the text slots whenever the buffer changes.
pub fn sync_console_lines(console: Res<Console>, mut query: Query<(&ConsoleLine, &mut Text)>) {
    if !console.is_changed() {
        return;
    }

    for (slot, mut text) in query.iter_mut() {
        if let Some(line) = console.lines().get(slot.0) {
            if text.0 != *line {
                text.0.clone_from(line);
            }
        }
    }
}
