use crate::card::{Card, CardChoice, ChoiceError};
use crate::search::{DeckRules, SearchConfig, DEFAULT_ESTIMATE_CUTOFF};
use crate::simulation::{ScoreWeights, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid card choice: {0}")]
    InvalidChoice(#[from] ChoiceError),
}

fn default_max_copies() -> usize {
    4
}

/// A card and the range of copies the search may pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEntry {
    pub card: Card,
    #[serde(default)]
    pub min: usize,
    #[serde(default = "default_max_copies")]
    pub max: usize,
}

/// Deck search configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub deck_size: usize,
    pub brute_force_limit: Option<usize>,
    pub games: usize,
    pub turns: u32,
    pub seed: Option<u64>,
    pub estimate_cutoff: u64,
    pub deck_rules: Option<DeckRules>,
    pub weights: ScoreWeights,
    pub cards: Vec<CardEntry>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let simulation = SimulationConfig::default();
        OptimizerConfig {
            deck_size: 60,
            brute_force_limit: None,
            games: simulation.games,
            turns: simulation.turns,
            seed: None,
            estimate_cutoff: DEFAULT_ESTIMATE_CUTOFF,
            deck_rules: None,
            weights: ScoreWeights::default(),
            cards: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Card entries as validated choices, in file order
    pub fn choices(&self) -> Result<Vec<CardChoice>, ConfigError> {
        self.cards
            .iter()
            .map(|entry| {
                CardChoice::new(entry.card.clone().normalized(), entry.min, entry.max)
                    .map_err(ConfigError::from)
            })
            .collect()
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            deck_size: self.deck_size,
            brute_force_limit: self.brute_force_limit,
            deck_rules: self.deck_rules,
            estimate_cutoff: self.estimate_cutoff,
            simulation: SimulationConfig {
                games: self.games,
                turns: self.turns,
                seed: self.seed,
            },
        }
    }
}

/// Load standalone deck rules (`{"min_lands": 16, ...}`)
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<DeckRules, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "deck_size": 20,
        "seed": 7,
        "deck_rules": {"min_lands": 8},
        "weights": {"finisher": 2.0},
        "cards": [
            {"card": {"card_type": "land", "name": "Mountain", "produces": ["R"], "is_basic": true},
             "min": 8, "max": 12},
            {"card": {"card_type": "spell", "name": "Lightning Bolt",
                      "mana_cost": {"symbols": ["R"]}, "tags": ["removal"], "impact": 1.5}},
            {"card": {"card_type": "creature", "name": "Goblin Guide",
                      "mana_cost": {"symbols": ["R"]}, "power": 2, "toughness": 2}, "max": 2}
        ]
    }"#;

    #[test]
    fn test_config_defaults_and_overrides() {
        let config = OptimizerConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.deck_size, 20);
        assert_eq!(config.games, 500);
        assert_eq!(config.turns, 6);
        assert_eq!(config.estimate_cutoff, DEFAULT_ESTIMATE_CUTOFF);
        assert_eq!(config.weights.finisher, 2.0);
        assert_eq!(config.weights.spell_cast, 1.2);

        let search = config.search_config();
        assert_eq!(search.simulation.seed, Some(7));
        assert_eq!(search.deck_rules.and_then(|r| r.min_lands), Some(8));
    }

    #[test]
    fn test_choices_use_default_ranges_and_normalize() {
        let config = OptimizerConfig::from_json(CONFIG).unwrap();
        let choices = config.choices().unwrap();
        assert_eq!(choices.len(), 3);
        assert_eq!((choices[0].min_count, choices[0].max_count), (8, 12));
        assert_eq!((choices[1].min_count, choices[1].max_count), (0, 4));
        assert_eq!(choices[1].card.mana_value(), 1);
        assert_eq!(choices[2].max_count, 2);
    }

    #[test]
    fn test_inverted_range_fails_fast() {
        let json = r#"{"cards": [{"card": {"card_type": "spell", "name": "Ponder"}, "min": 3, "max": 1}]}"#;
        let config = OptimizerConfig::from_json(json).unwrap();
        assert!(matches!(config.choices(), Err(ConfigError::InvalidChoice(_))));
    }
}
