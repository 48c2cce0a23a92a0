use crate::card::Card;
use crate::game::zones::{Battlefield, Hand, LandPermanent, Library};

/// Complete state of one simulated game
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub library: Library,
    pub hand: Hand,
    pub battlefield: Battlefield,
    pub turn: u32,
}

impl GameState {
    pub fn new(library: Library) -> Self {
        GameState {
            library,
            ..GameState::default()
        }
    }

    /// Move up to `size` cards from the top of the library into hand
    pub fn deal_opening_hand(&mut self, size: usize) {
        for _ in 0..size {
            if !self.draw_card() {
                break;
            }
        }
    }

    /// Draw a card from the library to hand
    pub fn draw_card(&mut self) -> bool {
        if let Some(card) = self.library.draw() {
            self.hand.add_card(card);
            true
        } else {
            false
        }
    }

    /// Play a land from hand to battlefield, honoring enters-tapped
    pub fn play_land(&mut self, card_index: usize) -> Option<&LandPermanent> {
        let card = self.hand.remove_card(card_index)?;
        if !card.is_land() {
            self.hand.add_card(card);
            return None;
        }
        self.battlefield.add_land(LandPermanent::new(card));
        self.battlefield.lands().last()
    }

    /// Start a new turn: increment turn counter and untap
    pub fn start_turn(&mut self) {
        self.turn += 1;
        self.battlefield.untap_all();
    }

    pub fn resolve(&mut self, card: Card) {
        self.battlefield.add_permanent(card);
    }
}
