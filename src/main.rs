mod camera;
mod character;
mod chat;
mod console;
mod game_state;
mod player;
mod settings;
mod world;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    log::LogPlugin,
    prelude::*,
    window::PresentMode,
};

use camera::CameraPlugin;
use character::CharacterPlugin;
use chat::ChatPlugin;
use console::ConsolePlugin;
use game_state::AppState;
use player::PlayerPlugin;
use settings::{GameSettings, SettingsError, SETTINGS_PATH};
use world::WorldPlugin;

fn main() -> Result<(), SettingsError> {
    // Bad settings stop the game before a window opens
    let settings = GameSettings::load_or_default(SETTINGS_PATH)?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: settings.window.title.clone(),
                        present_mode: PresentMode::AutoNoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: settings.window.log_filter.clone(),
                    ..default()
                }),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .init_state::<AppState>()
        .insert_resource(settings.camera)
        .insert_resource(settings.input)
        .insert_resource(settings.console)
        .insert_resource(settings.account)
        .add_plugins((
            ConsolePlugin,
            CharacterPlugin,
            WorldPlugin,
            PlayerPlugin,
            CameraPlugin,
            ChatPlugin,
        ))
        .run();

    Ok(())
}
