use crate::card::types::Card;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardDatabaseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Card not found: {0}")]
    CardNotFound(String),
}

/// Card metadata pool that resolves decklist names to full card records
#[derive(Debug, Default)]
pub struct CardDatabase {
    cards: HashMap<String, Card>,
}

impl CardDatabase {
    /// Load cards from a JSON file holding an array of cards
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CardDatabaseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CardDatabaseError> {
        let cards_vec: Vec<Card> = serde_json::from_str(content)?;
        Ok(Self::from_cards(cards_vec))
    }

    pub fn from_cards(cards_vec: Vec<Card>) -> Self {
        let mut cards = HashMap::new();
        for card in cards_vec {
            let card = card.normalized();
            cards.insert(card.name().to_lowercase(), card);
        }
        CardDatabase { cards }
    }

    /// Get a card by name (case-insensitive)
    pub fn get_card(&self, name: &str) -> Result<Card, CardDatabaseError> {
        self.cards
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| CardDatabaseError::CardNotFound(name.to_string()))
    }

    /// Get total number of cards
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: &str = r#"[
        {"card_type": "land", "name": "Forest", "produces": ["G"], "is_basic": true},
        {"card_type": "creature", "name": "Llanowar Elves",
         "mana_cost": {"symbols": ["G"]}, "power": 1, "toughness": 1}
    ]"#;

    #[test]
    fn test_load_cards() {
        let db = CardDatabase::from_json(CARDS).expect("Failed to load cards");
        assert_eq!(db.card_count(), 2);
    }

    #[test]
    fn test_get_card_normalizes_and_ignores_case() {
        let db = CardDatabase::from_json(CARDS).expect("Failed to load cards");
        let elves = db.get_card("llanowar elves").expect("Elves should exist");
        assert_eq!(elves.name(), "Llanowar Elves");
        assert_eq!(elves.mana_value(), 1);
        assert!(db.get_card("Forest").expect("Forest should exist").is_basic_land());
    }

    #[test]
    fn test_card_not_found() {
        let db = CardDatabase::from_json(CARDS).expect("Failed to load cards");
        let result = db.get_card("Nonexistent Card");
        assert!(matches!(result, Err(CardDatabaseError::CardNotFound(_))));
    }
}
