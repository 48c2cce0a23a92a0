use crate::card::{Card, ColorFlags};

/// A land on the battlefield with its tap state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandPermanent {
    pub card: Card,
    pub tapped: bool,
}

impl LandPermanent {
    /// Put a land into play; taplands arrive tapped
    pub fn new(card: Card) -> Self {
        let tapped = card.enters_tapped();
        LandPermanent { card, tapped }
    }

    pub fn untapped(card: Card) -> Self {
        LandPermanent {
            card,
            tapped: false,
        }
    }

    /// Colors this land can produce right now (nothing while tapped)
    #[inline]
    pub fn available_colors(&self) -> ColorFlags {
        if self.tapped {
            return ColorFlags::new();
        }
        self.card.produced_colors()
    }

    pub fn name(&self) -> &str {
        self.card.name()
    }
}

/// Library (deck) - ordered stack of cards, top is the front
#[derive(Debug, Clone, Default)]
pub struct Library {
    cards: Vec<Card>,
}

impl Library {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Library { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Hand - cards in hand
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove several cards at once; indices may come in any order
    pub fn remove_cards(&mut self, mut indices: Vec<usize>) -> Vec<Card> {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        let mut removed: Vec<Card> = indices
            .into_iter()
            .filter_map(|index| self.remove_card(index))
            .collect();
        removed.reverse();
        removed
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Battlefield - lands tracked separately from resolved spells
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    lands: Vec<LandPermanent>,
    permanents: Vec<Card>,
}

impl Battlefield {
    pub fn new() -> Self {
        Battlefield::default()
    }

    pub fn add_land(&mut self, land: LandPermanent) {
        self.lands.push(land);
    }

    pub fn add_permanent(&mut self, card: Card) {
        self.permanents.push(card);
    }

    pub fn lands(&self) -> &[LandPermanent] {
        &self.lands
    }

    pub fn lands_mut(&mut self) -> &mut [LandPermanent] {
        &mut self.lands
    }

    pub fn has_creature(&self) -> bool {
        self.permanents.iter().any(|c| c.is_creature())
    }

    pub fn untapped_land_count(&self) -> usize {
        self.lands.iter().filter(|l| !l.tapped).count()
    }

    /// Untap all lands
    pub fn untap_all(&mut self) {
        for land in &mut self.lands {
            land.tapped = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{ManaColor, ManaCost};

    #[test]
    fn test_tapped_land_produces_nothing() {
        let falls = Card::land("Thornwood Falls", &[ManaColor::Green, ManaColor::Blue])
            .entering_tapped();
        let mut perm = LandPermanent::new(falls);
        assert!(perm.tapped);
        assert!(perm.available_colors().is_empty());
        perm.tapped = false;
        assert_eq!(perm.available_colors().count(), 2);
    }

    #[test]
    fn test_library_draws_from_top() {
        let forest = Card::basic_land("Forest", ManaColor::Green);
        let elf = Card::creature("Elf", ManaCost::new(&[ManaColor::Green], 0), 1, 1);
        let mut library = Library::from_cards(vec![elf.clone(), forest]);
        assert_eq!(library.draw(), Some(elf));
        assert_eq!(library.size(), 1);
        library.draw();
        assert_eq!(library.draw(), None);
    }

    #[test]
    fn test_hand_remove_cards_keeps_hand_order() {
        let mut hand = Hand::new();
        for name in ["A", "B", "C", "D"] {
            hand.add_card(Card::spell(name, ManaCost::default()));
        }
        let removed = hand.remove_cards(vec![2, 0]);
        let names: Vec<&str> = removed.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
        let left: Vec<&str> = hand.cards().iter().map(|c| c.name()).collect();
        assert_eq!(left, vec!["B", "D"]);
    }

    #[test]
    fn test_untap_all() {
        let mut battlefield = Battlefield::new();
        let forest = Card::basic_land("Forest", ManaColor::Green);
        battlefield.add_land(LandPermanent {
            card: forest,
            tapped: true,
        });
        assert_eq!(battlefield.untapped_land_count(), 0);
        battlefield.untap_all();
        assert_eq!(battlefield.untapped_land_count(), 1);
    }
}
