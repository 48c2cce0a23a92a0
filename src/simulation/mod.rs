pub mod deck;
pub mod engine;
pub mod report;
pub mod summary;
pub mod trace;

pub use deck::{
    choices_from_decklist, fixed_deck_size, parse_deck_file, parse_decklist_lines, DeckError,
    DecklistEntry, DecklistMode, BASIC_LAND_NAMES,
};
pub use engine::{play_game, run_game, run_game_with_trace, OPENING_HAND_SIZE};
pub use report::{describe_card_rating, format_trace, render_deck_count, summary_string};
pub use summary::{
    example_simulation_trace, simulate_deck, simulate_deck_with_rng, GameResult, ScoreWeights,
    SimulationConfig, SimulationSummary,
};
pub use trace::{GameTrace, TurnTrace};
