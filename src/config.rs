//! Tuning and text configuration, stored as RON documents.

use crate::errors::ConfigError;
use schema::{Move, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const AI_RON: &str = include_str!("../data/ai.ron");

/// One entry of an AI preference table. Matching is exhaustive, so a table
/// containing any other kind fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    /// Prefer this exact move.
    Move(Move),
    /// Prefer moves that change this statistic by exactly this delta.
    Statistic(StatType, i8),
    /// Attacking type is super effective against a defender of the second type.
    Super(PokemonType, PokemonType),
    /// Attacking type is weak against a defender of the second type.
    Weak(PokemonType, PokemonType),
}

/// A preference table and the leader personas allowed to use it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicTable {
    #[serde(default)]
    pub eligible_leaders: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
}

impl HeuristicTable {
    pub fn is_eligible(&self, leader_name: &str) -> bool {
        self.eligible_leaders
            .iter()
            .any(|eligible| eligible.eq_ignore_ascii_case(leader_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub neutral_cost: i32,
    pub status_penalty: i32,
    pub second_turn: HeuristicTable,
    pub effectiveness: HeuristicTable,
}

impl AiConfig {
    /// The table that ships with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_ron(AI_RON, "data/ai.ron")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_ron(path)
    }
}

/// Narrative strings callers may replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverrides {
    pub flee_success: String,
    pub flee_failure: String,
    pub flee_forbidden: String,
    pub wild_fled: String,
    pub victory: String,
    pub defeat: String,
}

impl Default for TextOverrides {
    fn default() -> Self {
        Self {
            flee_success: "Got away safely!".to_string(),
            flee_failure: "Can't escape!".to_string(),
            flee_forbidden: "No! There's no running from a trainer battle!".to_string(),
            wild_fled: "The wild Pokémon fled!".to_string(),
            victory: "You won the battle!".to_string(),
            defeat: "You are out of usable Pokémon! You blacked out!".to_string(),
        }
    }
}

/// Everything a caller can tune without recompiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub ai: AiConfig,
    #[serde(default)]
    pub text: TextOverrides,
}

impl EngineConfig {
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            ai: AiConfig::builtin()?,
            text: TextOverrides::default(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_ron(path)
    }
}

fn load_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let source = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_ron(&source, &path.display().to_string())
}

fn parse_ron<T: for<'de> Deserialize<'de>>(source: &str, source_name: &str) -> Result<T, ConfigError> {
    ron::from_str(source).map_err(|err| ConfigError::Parse {
        source_name: source_name.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_ai_config_loads() {
        let config = AiConfig::builtin().unwrap();
        assert_eq!(config.neutral_cost, 10);
        assert_eq!(config.status_penalty, 5);
        assert!(config.second_turn.is_eligible("brock"));
        assert!(config
            .effectiveness
            .preferences
            .contains(&Preference::Super(PokemonType::Water, PokemonType::Fire)));
    }

    #[test]
    fn test_unknown_preference_kind_is_fatal() {
        let source = r#"(
            neutral_cost: 10,
            status_penalty: 5,
            second_turn: (preferences: [Sometimes(Tackle)]),
            effectiveness: (),
        )"#;
        let result: Result<AiConfig, _> = parse_ron(source, "inline");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_engine_config_text_defaults() {
        let source = r#"(
            ai: (
                neutral_cost: 10,
                status_penalty: 5,
                second_turn: (),
                effectiveness: (),
            ),
            text: (flee_failure: "No escape!"),
        )"#;
        let config: EngineConfig = parse_ron(source, "inline").unwrap();
        assert_eq!(config.text.flee_failure, "No escape!");
        assert_eq!(config.text.flee_success, "Got away safely!");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::load(Path::new("/nonexistent/engine.ron"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
