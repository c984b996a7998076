//! Character record for the signed-in account.

use std::{fs, io, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::Console;
use crate::game_state::AppState;
use crate::settings::AccountSettings;

/// Identity and progression of the player's character.
#[derive(Component, Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub account: String,
    /// Last saved world position.
    pub position: [f32; 3],
    pub name: String,
    pub experience: u32,
    pub experience_to_level: u32,
    pub level: u32,
    pub is_male: bool,
}

impl CharacterData {
    /// Level 1 character used when no record could be loaded.
    pub fn placeholder(account: &str) -> Self {
        Self {
            account: account.to_string(),
            position: [0.0; 3],
            name: account.to_string(),
            experience: 0,
            experience_to_level: 100,
            level: 1,
            is_male: true,
        }
    }

    pub fn spawn_position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("no character record at {0}")]
    Missing(String),
    #[error("failed to read character record: {0}")]
    Io(#[from] io::Error),
    #[error("malformed character record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record belongs to account `{found}`, expected `{expected}`")]
    WrongAccount { expected: String, found: String },
}

pub fn load_character_record(path: impl AsRef<Path>, account: &str) -> Result<CharacterData, AccountError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(AccountError::Missing(path.display().to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    let record: CharacterData = serde_json::from_str(&contents)?;
    if record.account != account {
        return Err(AccountError::WrongAccount {
            expected: account.to_string(),
            found: record.account,
        });
    }
    Ok(record)
}

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::LoadingAccount), load_account)
            .add_systems(OnEnter(AppState::InGame), greet_character);
    }
}

fn load_account(
    mut commands: Commands,
    settings: Res<AccountSettings>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let record = match load_character_record(&settings.character_file, &settings.account) {
        Ok(record) => {
            info!(
                "Loaded character '{}' (level {}) for account {}",
                record.name, record.level, record.account
            );
            record
        }
        Err(err) => {
            warn!("{err}; using a placeholder character");
            CharacterData::placeholder(&settings.account)
        }
    };

    commands.insert_resource(record);
    next_state.set(AppState::InGame);
}

fn greet_character(record: Res<CharacterData>, mut console: ResMut<Console>) {
    console.print(format!("Welcome, {} (level {})", record.name, record.level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_from_json() {
        let record: CharacterData = serde_json::from_str(
            r#"{
                "account": "ada",
                "position": [1.0, 0.0, -2.0],
                "name": "Ada",
                "experience": 40,
                "experienceToLevel": 120,
                "level": 3,
                "isMale": false
            }"#,
        )
        .unwrap();

        assert_eq!(record.spawn_position(), Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(record.experience_to_level, 120);
        assert!(!record.is_male);
    }

    #[test]
    fn negative_experience_is_rejected() {
        let result = serde_json::from_str::<CharacterData>(
            r#"{ "account": "a", "position": [0,0,0], "name": "a",
                 "experience": -5, "experienceToLevel": 1, "level": 1, "isMale": true }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_character_record("no/such/character.json", "guest").unwrap_err();
        assert!(matches!(err, AccountError::Missing(_)));
    }

    #[test]
    fn record_for_other_account_is_rejected() {
        let path = std::env::temp_dir().join(format!("wayfarer-character-{}.json", std::process::id()));
        let record = CharacterData::placeholder("someone-else");
        fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

        let result = load_character_record(&path, "guest");
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AccountError::WrongAccount { .. })));
    }
}
