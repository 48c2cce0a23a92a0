pub mod choice;
pub mod database;
pub mod deck;
pub mod types;

pub use choice::{CardChoice, ChoiceError};
pub use database::{CardDatabase, CardDatabaseError};
pub use deck::{Deck, DeckEntry};
pub use types::{
    BaseCard, Card, CardTag, ColorFlags, CreatureCard, LandCard, ManaColor, ManaCost, SpellCard,
};
