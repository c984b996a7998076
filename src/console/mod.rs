pub mod buffer;
pub mod ui;

use bevy::prelude::*;

pub use buffer::Console;

use crate::game_state::AppState;
use crate::settings::ConsoleSettings;
use ui::{cleanup_console_ui, setup_console_ui, sync_console_lines};

pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        let lines = app
            .world()
            .get_resource::<ConsoleSettings>()
            .map(|settings| settings.lines)
            .unwrap_or_else(|| ConsoleSettings::default().lines);

        app.insert_resource(Console::new(lines))
            .add_systems(OnEnter(AppState::InGame), setup_console_ui)
            .add_systems(OnExit(AppState::InGame), cleanup_console_ui)
            .add_systems(Update, sync_console_lines.run_if(in_state(AppState::InGame)));
    }
}
