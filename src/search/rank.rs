use crate::card::Deck;
use crate::progress::{Progress, ProgressReporter};
use crate::rng::GameRng;
use crate::search::SearchConfig;
use crate::simulation::{simulate_deck_with_rng, ScoreWeights, SimulationSummary};
use log::info;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Decks simulated between two progress checks
const CHUNK_SIZE: usize = 64;

/// Simulate every deck that passes `config.deck_rules` and sort the
/// summaries by descending average score, ties keeping input order.
///
/// Decks run in parallel; deck `i` always draws from the stream derived
/// from the base seed and `i`, so a seeded ranking does not depend on the
/// thread count. Progress is reported from the calling thread.
pub fn rank_decks(
    decks: &[Deck],
    config: &SearchConfig,
    weights: &ScoreWeights,
    progress: &mut dyn Progress,
) -> Vec<SimulationSummary> {
    let eligible: Vec<(usize, &Deck)> = decks
        .iter()
        .enumerate()
        .filter(|(_, deck)| {
            config
                .deck_rules
                .as_ref()
                .map_or(true, |rules| rules.validate_deck(deck))
        })
        .collect();
    let total = eligible.len();

    let mut reporter = ProgressReporter::new(progress);
    reporter.start(total);

    let base = GameRng::new(config.simulation.seed);
    info!(
        "Ranking {} decks ({} filtered out), {} games x {} turns each (seed: {})",
        total,
        decks.len() - total,
        config.simulation.games,
        config.simulation.turns,
        base.seed()
    );

    let mut summaries = Vec::with_capacity(total);
    for chunk in eligible.chunks(CHUNK_SIZE) {
        let batch: Vec<SimulationSummary> = chunk
            .par_iter()
            .map(|&(index, deck)| {
                let mut rng = base.derive(index as u64);
                simulate_deck_with_rng(deck, &config.simulation, weights, &mut rng)
            })
            .collect();
        summaries.extend(batch);
        reporter.tick(summaries.len(), total);
    }
    reporter.finish(summaries.len(), total);

    summaries.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
    });

    if let Some(best) = summaries.first() {
        info!("Best average score: {:.3}", best.average_score);
    }
    summaries
}
