use crate::card::Card;
use serde::{Deserialize, Serialize};

/// One distinct card and how many copies the deck runs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Card,
    pub count: usize,
}

/// A deck composition: distinct cards mapped to copy counts.
///
/// Entries keep the order they were added in and zero counts are never
/// stored, so two decks built from the same choice list compare equal
/// exactly when every count matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new() -> Self {
        Deck::default()
    }

    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Card, usize)>,
    {
        let mut deck = Deck::new();
        for (card, count) in counts {
            deck.add(card, count);
        }
        deck
    }

    /// Add copies of a card, merging with an existing entry
    pub fn add(&mut self, card: Card, count: usize) {
        if count == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.card == card) {
            Some(entry) => entry.count += count,
            None => self.entries.push(DeckEntry { card, count }),
        }
    }

    pub fn count_of(&self, card: &Card) -> usize {
        self.entries
            .iter()
            .find(|e| &e.card == card)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    /// Total number of cards
    pub fn size(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn land_count(&self) -> usize {
        self.count_where(|c| c.is_land())
    }

    pub fn creature_count(&self) -> usize {
        self.count_where(|c| c.is_creature())
    }

    fn count_where<F: Fn(&Card) -> bool>(&self, predicate: F) -> usize {
        self.entries
            .iter()
            .filter(|e| predicate(&e.card))
            .map(|e| e.count)
            .sum()
    }

    /// Expand into a list of individual cards, entry order preserved
    pub fn expand(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.size());
        for entry in &self.entries {
            for _ in 0..entry.count {
                cards.push(entry.card.clone());
            }
        }
        cards
    }
}
