use crate::card::Deck;
use crate::rng::GameRng;
use crate::simulation::engine::{run_game, run_game_with_trace};
use crate::simulation::trace::GameTrace;
use log::trace;
use serde::{Deserialize, Serialize};

/// Raw counters from one simulated game
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GameResult {
    pub spells_cast: u32,
    pub mana_spent: u32,
    pub board_impact: f64,
    pub spell_impact: f64,
    pub interaction_spells: u32,
    pub counter_spells: u32,
    pub draw_spells: u32,
    pub finishers: u32,
    pub color_screw_turns: u32,
    pub land_drops_missed: u32,
}

impl GameResult {
    /// Weighted sum of the productive counters minus the screw/miss penalties
    pub fn score(&self, weights: &ScoreWeights) -> f64 {
        let gains = self.spells_cast as f64 * weights.spell_cast
            + self.mana_spent as f64 * weights.mana_spent
            + self.board_impact * weights.board_impact
            + self.spell_impact * weights.spell_impact
            + self.interaction_spells as f64 * weights.interaction
            + self.counter_spells as f64 * weights.counterspell
            + self.draw_spells as f64 * weights.card_draw
            + self.finishers as f64 * weights.finisher;
        let penalties = self.color_screw_turns as f64 * weights.color_screw_penalty
            + self.land_drops_missed as f64 * weights.missed_land_penalty;
        gains - penalties
    }
}

/// Scoring policy. Every weight can be overridden from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub spell_cast: f64,
    pub mana_spent: f64,
    pub board_impact: f64,
    pub spell_impact: f64,
    pub interaction: f64,
    pub counterspell: f64,
    pub card_draw: f64,
    pub finisher: f64,
    pub color_screw_penalty: f64,
    pub missed_land_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            spell_cast: 1.2,
            mana_spent: 0.2,
            board_impact: 0.25,
            spell_impact: 0.3,
            interaction: 0.6,
            counterspell: 0.5,
            card_draw: 0.4,
            finisher: 1.0,
            color_screw_penalty: 0.5,
            missed_land_penalty: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    pub turns: u32,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 500,
            turns: 6,
            seed: None,
        }
    }
}

/// Per-deck averages over every simulated game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub deck: Deck,
    pub games: usize,
    pub average_score: f64,
    pub average_spells_cast: f64,
    pub average_mana_spent: f64,
    pub average_board_impact: f64,
    pub average_spell_impact: f64,
    pub average_interaction: f64,
    pub average_counterspells: f64,
    pub average_card_draw: f64,
    pub average_finishers: f64,
    pub average_color_screw: f64,
    pub average_land_miss: f64,
}

#[derive(Default)]
struct Totals {
    score: f64,
    spells_cast: f64,
    mana_spent: f64,
    board_impact: f64,
    spell_impact: f64,
    interaction: f64,
    counterspells: f64,
    card_draw: f64,
    finishers: f64,
    color_screw: f64,
    land_miss: f64,
}

impl Totals {
    fn add(&mut self, result: &GameResult, weights: &ScoreWeights) {
        self.score += result.score(weights);
        self.spells_cast += result.spells_cast as f64;
        self.mana_spent += result.mana_spent as f64;
        self.board_impact += result.board_impact;
        self.spell_impact += result.spell_impact;
        self.interaction += result.interaction_spells as f64;
        self.counterspells += result.counter_spells as f64;
        self.card_draw += result.draw_spells as f64;
        self.finishers += result.finishers as f64;
        self.color_screw += result.color_screw_turns as f64;
        self.land_miss += result.land_drops_missed as f64;
    }

    fn into_summary(self, deck: &Deck, games: usize) -> SimulationSummary {
        // No games leaves every average at zero instead of NaN
        let n = games.max(1) as f64;
        SimulationSummary {
            deck: deck.clone(),
            games,
            average_score: self.score / n,
            average_spells_cast: self.spells_cast / n,
            average_mana_spent: self.mana_spent / n,
            average_board_impact: self.board_impact / n,
            average_spell_impact: self.spell_impact / n,
            average_interaction: self.interaction / n,
            average_counterspells: self.counterspells / n,
            average_card_draw: self.card_draw / n,
            average_finishers: self.finishers / n,
            average_color_screw: self.color_screw / n,
            average_land_miss: self.land_miss / n,
        }
    }
}

/// Simulate `config.games` games of `deck` and average the results.
///
/// All games share one RNG stream seeded from `config.seed` (or from entropy
/// when no seed is given), so a fixed seed reproduces the summary exactly.
pub fn simulate_deck(
    deck: &Deck,
    config: &SimulationConfig,
    weights: &ScoreWeights,
) -> SimulationSummary {
    let mut rng = GameRng::new(config.seed);
    simulate_deck_with_rng(deck, config, weights, &mut rng)
}

/// Same as [`simulate_deck`] but draws from a caller-owned stream
pub fn simulate_deck_with_rng(
    deck: &Deck,
    config: &SimulationConfig,
    weights: &ScoreWeights,
    rng: &mut GameRng,
) -> SimulationSummary {
    let mut totals = Totals::default();
    for _ in 0..config.games {
        let result = run_game(deck, config.turns, rng);
        totals.add(&result, weights);
    }
    let summary = totals.into_summary(deck, config.games);
    trace!(
        "Simulated {} games of a {}-card deck: avg score {:.3}",
        config.games,
        deck.size(),
        summary.average_score
    );
    summary
}

/// One narrated game of `deck`, for illustrative output
pub fn example_simulation_trace(deck: &Deck, config: &SimulationConfig) -> GameTrace {
    let mut rng = GameRng::new(config.seed);
    let (_, trace) = run_game_with_trace(deck, config.turns, &mut rng);
    trace
}
