use crate::card::{CardChoice, Deck};
use crate::progress::{Progress, ProgressReporter};
use crate::rng::GameRng;
use crate::search::rules::DeckRules;
use crate::search::SearchConfig;
use log::{debug, info};

/// Per-slot bounds on what the not-yet-assigned choices can still add.
/// Index `i` covers slots `i..`; the last entry is all zeros.
#[derive(Debug, Clone)]
struct SuffixBounds {
    min_cards: Vec<usize>,
    max_cards: Vec<usize>,
    min_lands: Vec<usize>,
    max_lands: Vec<usize>,
    min_creatures: Vec<usize>,
    max_creatures: Vec<usize>,
}

impl SuffixBounds {
    fn new(slots: &[&CardChoice]) -> Self {
        let n = slots.len();
        let mut bounds = SuffixBounds {
            min_cards: vec![0; n + 1],
            max_cards: vec![0; n + 1],
            min_lands: vec![0; n + 1],
            max_lands: vec![0; n + 1],
            min_creatures: vec![0; n + 1],
            max_creatures: vec![0; n + 1],
        };
        for i in (0..n).rev() {
            let choice = slots[i];
            bounds.min_cards[i] = bounds.min_cards[i + 1] + choice.min_count;
            bounds.max_cards[i] = bounds.max_cards[i + 1] + choice.max_count;
            bounds.min_lands[i] = bounds.min_lands[i + 1] + choice.lands_for(choice.min_count);
            bounds.max_lands[i] = bounds.max_lands[i + 1] + choice.lands_for(choice.max_count);
            bounds.min_creatures[i] =
                bounds.min_creatures[i + 1] + choice.creatures_for(choice.min_count);
            bounds.max_creatures[i] =
                bounds.max_creatures[i + 1] + choice.creatures_for(choice.max_count);
        }
        bounds
    }
}

/// Mutable traversal state for one search invocation
struct DeckSearch<'a, 'p> {
    choices: &'a [CardChoice],
    /// Exploration order: `order[slot]` is an index into `choices`
    order: Vec<usize>,
    bounds: SuffixBounds,
    rules: Option<&'a DeckRules>,
    limit: Option<usize>,
    counts: Vec<usize>,
    found: Vec<Deck>,
    rng: GameRng,
    reporter: ProgressReporter<'p>,
}

impl DeckSearch<'_, '_> {
    fn limit_reached(&self) -> bool {
        self.limit.map_or(false, |limit| self.found.len() >= limit)
    }

    fn explore(&mut self, slot: usize, remaining: usize, lands: usize, creatures: usize) {
        if self.limit_reached() {
            return;
        }
        if remaining < self.bounds.min_cards[slot] || remaining > self.bounds.max_cards[slot] {
            return;
        }
        if let Some(rules) = self.rules {
            let lands_possible = rules.lands_reachable(
                lands + self.bounds.min_lands[slot],
                lands + self.bounds.max_lands[slot],
            );
            let creatures_possible = rules.creatures_reachable(
                creatures + self.bounds.min_creatures[slot],
                creatures + self.bounds.max_creatures[slot],
            );
            if !lands_possible || !creatures_possible {
                return;
            }
        }

        if slot == self.order.len() {
            if remaining == 0 && self.rules.map_or(true, |r| r.validate(lands, creatures)) {
                self.emit();
            }
            return;
        }

        let index = self.order[slot];
        let choice = &self.choices[index];
        let mut options: Vec<usize> = choice.options().take_while(|&c| c <= remaining).collect();
        self.rng.shuffle(&mut options);

        for count in options {
            self.counts[index] = count;
            self.explore(
                slot + 1,
                remaining - count,
                lands + choice.lands_for(count),
                creatures + choice.creatures_for(count),
            );
            if self.limit_reached() {
                break;
            }
        }
        self.counts[index] = 0;
    }

    fn emit(&mut self) {
        let deck = Deck::from_counts(
            self.choices
                .iter()
                .zip(&self.counts)
                .map(|(choice, &count)| (choice.card.clone(), count)),
        );
        self.found.push(deck);
        self.reporter
            .tick(self.found.len(), self.limit.unwrap_or(0));
    }
}

/// Enumerate up to `config.brute_force_limit` legal compositions.
///
/// Backtracks card by card, abandoning a branch as soon as the remaining
/// slots cannot reach the deck size or the configured land/creature bounds.
/// Both the card order and each slot's count order are shuffled from
/// `config.simulation.seed`, so a truncated search samples a different
/// region per seed while a fixed seed always yields the same sequence.
/// An unreachable deck size yields no decks.
pub fn brute_force_decks(
    choices: &[CardChoice],
    config: &SearchConfig,
    progress: &mut dyn Progress,
) -> Vec<Deck> {
    let mut reporter = ProgressReporter::new(progress);
    let limit = config.brute_force_limit;
    reporter.start(limit.unwrap_or(0));

    if limit == Some(0) {
        reporter.finish(0, 0);
        return Vec::new();
    }

    let mut rng = GameRng::new(config.simulation.seed);
    let mut order: Vec<usize> = (0..choices.len()).collect();
    rng.shuffle(&mut order);
    let slots: Vec<&CardChoice> = order.iter().map(|&i| &choices[i]).collect();
    let bounds = SuffixBounds::new(&slots);

    info!(
        "Searching decks of {} cards over {} choices (limit: {:?}, seed: {})",
        config.deck_size,
        choices.len(),
        limit,
        rng.seed()
    );

    let mut search = DeckSearch {
        choices,
        order,
        bounds,
        rules: config.deck_rules.as_ref(),
        limit,
        counts: vec![0; choices.len()],
        found: Vec::new(),
        rng,
        reporter,
    };
    search.explore(0, config.deck_size, 0, 0);

    let found = search.found.len();
    let target = match limit {
        Some(limit) if found >= limit => limit,
        _ => found,
    };
    search.reporter.finish(found, target);
    debug!("Deck search found {} compositions", found);
    search.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, ManaColor, ManaCost};
    use crate::progress::NoProgress;
    use crate::search::count::{count_possible_decks, DEFAULT_ESTIMATE_CUTOFF};
    use crate::simulation::SimulationConfig;
    use std::collections::HashSet;

    fn choice(card: Card, min: usize, max: usize) -> CardChoice {
        CardChoice::new(card, min, max).expect("valid range")
    }

    fn named_spells(max: usize) -> Vec<CardChoice> {
        ["One", "Two", "Three"]
            .iter()
            .map(|name| choice(Card::spell(name, ManaCost::default()), 0, max))
            .collect()
    }

    fn config(deck_size: usize, limit: Option<usize>, seed: u64) -> SearchConfig {
        SearchConfig {
            deck_size,
            brute_force_limit: limit,
            simulation: SimulationConfig {
                seed: Some(seed),
                ..SimulationConfig::default()
            },
            ..SearchConfig::default()
        }
    }

    fn signatures(decks: &[Deck]) -> Vec<Vec<(String, usize)>> {
        decks
            .iter()
            .map(|deck| {
                let mut sig: Vec<(String, usize)> = deck
                    .entries()
                    .iter()
                    .map(|e| (e.card.name().to_string(), e.count))
                    .collect();
                sig.sort();
                sig
            })
            .collect()
    }

    #[test]
    fn test_every_deck_hits_size_and_ranges() {
        let choices = named_spells(2);
        let decks = brute_force_decks(&choices, &config(3, None, 1), &mut NoProgress);
        assert_eq!(decks.len(), 7);
        for deck in &decks {
            assert_eq!(deck.size(), 3);
            for c in &choices {
                let n = deck.count_of(&c.card);
                assert!(n >= c.min_count && n <= c.max_count);
            }
        }
        let distinct: HashSet<&Deck> = decks.iter().collect();
        assert_eq!(distinct.len(), decks.len());
    }

    #[test]
    fn test_bruteforce_respects_deck_rules() {
        let land = Card::basic_land("Forest", ManaColor::Green);
        let creature = Card::creature("Elf", ManaCost::new(&[ManaColor::Green], 0), 1, 1);
        let burn = Card::spell("Bolt", ManaCost::new(&[ManaColor::Red], 0));
        let choices = vec![
            choice(land.clone(), 0, 4),
            choice(creature.clone(), 0, 4),
            choice(burn, 0, 4),
        ];
        let rules = DeckRules {
            min_lands: Some(2),
            max_lands: Some(4),
            min_creatures: Some(1),
            max_creatures: Some(3),
        };
        let mut cfg = config(6, None, 9);
        cfg.deck_rules = Some(rules);

        let decks = brute_force_decks(&choices, &cfg, &mut NoProgress);
        assert!(!decks.is_empty());
        for deck in &decks {
            let lands = deck.count_of(&land);
            let creatures = deck.count_of(&creature);
            assert!((2..=4).contains(&lands));
            assert!((1..=3).contains(&creatures));
        }
        let counted = count_possible_decks(&choices, 6, Some(&rules), DEFAULT_ESTIMATE_CUTOFF);
        assert_eq!(counted.total, decks.len() as u64);
    }

    #[test]
    fn test_counter_matches_enumeration() {
        let choices = vec![
            choice(Card::basic_land("Island", ManaColor::Blue), 2, 6),
            choice(Card::creature("Turtle", ManaCost::new(&[ManaColor::Blue], 0), 0, 5), 0, 4),
            choice(Card::spell("Ponder", ManaCost::new(&[ManaColor::Blue], 0)), 1, 4),
            choice(Card::spell("Counterspell", ManaCost::new(&[ManaColor::Blue, ManaColor::Blue], 0)), 0, 3),
        ];
        let decks = brute_force_decks(&choices, &config(10, None, 3), &mut NoProgress);
        let counted = count_possible_decks(&choices, 10, None, DEFAULT_ESTIMATE_CUTOFF);
        assert!(!counted.estimated);
        assert_eq!(counted.total, decks.len() as u64);
    }

    #[test]
    fn test_brute_force_randomizes_with_reproducible_seed() {
        let choices = named_spells(2);
        let first = signatures(&brute_force_decks(&choices, &config(3, Some(4), 5), &mut NoProgress));
        let second = signatures(&brute_force_decks(&choices, &config(3, Some(4), 5), &mut NoProgress));
        assert_eq!(first, second);

        let differs = (6..26).any(|seed| {
            signatures(&brute_force_decks(&choices, &config(3, Some(4), seed), &mut NoProgress))
                != first
        });
        assert!(differs, "different seeds should explore different subsets first");
    }

    #[test]
    fn test_limit_stops_search() {
        let choices = named_spells(2);
        let decks = brute_force_decks(&choices, &config(3, Some(2), 1), &mut NoProgress);
        assert_eq!(decks.len(), 2);
        let none = brute_force_decks(&choices, &config(3, Some(0), 1), &mut NoProgress);
        assert!(none.is_empty());
    }

    #[test]
    fn test_unreachable_size_returns_nothing() {
        let choices = named_spells(2);
        let decks = brute_force_decks(&choices, &config(9, None, 1), &mut NoProgress);
        assert!(decks.is_empty());
    }

    #[test]
    fn test_brute_force_reports_progress() {
        let choices = vec![
            choice(Card::spell("One", ManaCost::default()), 0, 1),
            choice(Card::spell("Two", ManaCost::default()), 0, 1),
        ];
        let mut calls: Vec<(usize, usize)> = Vec::new();
        let mut observer = |done: usize, total: usize| calls.push((done, total));
        let decks = brute_force_decks(&choices, &config(1, Some(3), 1), &mut observer);

        assert_eq!(decks.len(), 2);
        assert_eq!(calls.first(), Some(&(0, 3)));
        assert_eq!(calls.last(), Some(&(2, 2)));
    }

    #[test]
    fn test_progress_target_is_limit_when_reached() {
        let choices = named_spells(2);
        let mut calls: Vec<(usize, usize)> = Vec::new();
        let mut observer = |done: usize, total: usize| calls.push((done, total));
        brute_force_decks(&choices, &config(3, Some(4), 1), &mut observer);
        assert_eq!(calls.last(), Some(&(4, 4)));
    }
}
