use bevy::prelude::*;

/// Main application states controlling game flow.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Character record is being read from disk.
    #[default]
    LoadingAccount,
    InGame,
}
