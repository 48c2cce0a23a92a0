use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("Invalid count range for {card}: min {min} exceeds max {max}")]
    InvertedRange { card: String, min: usize, max: usize },
}

/// A card paired with the inclusive range of copies a search may select
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardChoice {
    pub card: Card,
    pub min_count: usize,
    pub max_count: usize,
}

impl CardChoice {
    pub fn new(card: Card, min_count: usize, max_count: usize) -> Result<Self, ChoiceError> {
        if min_count > max_count {
            return Err(ChoiceError::InvertedRange {
                card: card.name().to_string(),
                min: min_count,
                max: max_count,
            });
        }
        Ok(CardChoice {
            card,
            min_count,
            max_count,
        })
    }

    /// Exactly `count` copies
    pub fn fixed(card: Card, count: usize) -> Self {
        CardChoice {
            card,
            min_count: count,
            max_count: count,
        }
    }

    pub fn options(&self) -> RangeInclusive<usize> {
        self.min_count..=self.max_count
    }

    /// Land count contributed when `count` copies are chosen
    pub fn lands_for(&self, count: usize) -> usize {
        if self.card.is_land() {
            count
        } else {
            0
        }
    }

    pub fn creatures_for(&self, count: usize) -> usize {
        if self.card.is_creature() {
            count
        } else {
            0
        }
    }
}
