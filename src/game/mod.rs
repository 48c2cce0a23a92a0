pub mod mana;
pub mod state;
pub mod zones;

pub use mana::{can_pay, pay, plan_payment, LandTap, Payment, PaymentPlan};
pub use state::GameState;
pub use zones::{Battlefield, Hand, LandPermanent, Library};
