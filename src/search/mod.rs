pub mod count;
pub mod enumerate;
pub mod rank;
pub mod rules;

pub use count::{abbreviate, count_possible_decks, DeckCount, DEFAULT_ESTIMATE_CUTOFF};
pub use enumerate::brute_force_decks;
pub use rank::rank_decks;
pub use rules::DeckRules;

use crate::simulation::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Everything one search-and-rank run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub deck_size: usize,
    /// Stop enumerating after this many compositions; `None` means all
    pub brute_force_limit: Option<usize>,
    pub deck_rules: Option<DeckRules>,
    pub estimate_cutoff: u64,
    pub simulation: SimulationConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            deck_size: 60,
            brute_force_limit: None,
            deck_rules: None,
            estimate_cutoff: DEFAULT_ESTIMATE_CUTOFF,
            simulation: SimulationConfig::default(),
        }
    }
}
