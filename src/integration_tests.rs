//! End-to-end tests: count, search, simulate and rank small card pools
//! with known seeds.

use crate::card::{Card, CardChoice, CardDatabase, CardTag, Deck, ManaColor, ManaCost};
use crate::progress::NoProgress;
use crate::search::{
    brute_force_decks, count_possible_decks, rank_decks, DeckRules, SearchConfig,
    DEFAULT_ESTIMATE_CUTOFF,
};
use crate::simulation::{
    choices_from_decklist, parse_decklist_lines, run_game, simulate_deck, DecklistMode,
    ScoreWeights, SimulationConfig,
};
use crate::rng::GameRng;

fn choice(card: Card, min: usize, max: usize) -> CardChoice {
    CardChoice::new(card, min, max).expect("valid range")
}

fn forest() -> Card {
    Card::basic_land("Forest", ManaColor::Green)
}

fn elf() -> Card {
    Card::creature("Elf", ManaCost::new(&[ManaColor::Green], 0), 1, 1)
}

fn bolt() -> Card {
    Card::spell("Bolt", ManaCost::new(&[ManaColor::Red], 0)).with_tags(&[CardTag::Removal])
}

fn search_config(deck_size: usize, limit: Option<usize>, seed: u64) -> SearchConfig {
    SearchConfig {
        deck_size,
        brute_force_limit: limit,
        simulation: SimulationConfig {
            games: 20,
            turns: 4,
            seed: Some(seed),
        },
        ..SearchConfig::default()
    }
}

#[test]
fn test_count_estimates_large_space() {
    let choices = vec![
        choice(Card::basic_land("Land", ManaColor::Green), 0, 20),
        choice(Card::creature("Creature", ManaCost::new(&[ManaColor::Green], 0), 1, 1), 0, 20),
        choice(Card::spell("Spell", ManaCost::new(&[ManaColor::Green], 0)), 0, 20),
    ];
    let count = count_possible_decks(&choices, 20, None, 5);
    assert!(count.estimated);
    assert_eq!(count.total, 5);
    assert_eq!((count.lower_bound, count.upper_bound), (5, 10));
}

#[test]
fn test_bruteforce_respects_deck_rules() {
    let choices = vec![
        choice(forest(), 0, 4),
        choice(elf(), 0, 4),
        choice(bolt(), 0, 4),
    ];
    let mut config = search_config(6, None, 17);
    config.deck_rules = Some(DeckRules {
        min_lands: Some(2),
        max_lands: Some(4),
        min_creatures: Some(1),
        max_creatures: Some(3),
    });

    let decks = brute_force_decks(&choices, &config, &mut NoProgress);
    assert!(!decks.is_empty());
    for deck in &decks {
        assert_eq!(deck.size(), 6);
        assert!((2..=4).contains(&deck.land_count()));
        assert!((1..=3).contains(&deck.creature_count()));
    }
}

#[test]
fn test_search_then_rank_prefers_castable_decks() {
    let choices = vec![
        choice(forest(), 4, 12),
        choice(Card::basic_land("Mountain", ManaColor::Red), 0, 8),
        choice(elf(), 0, 8),
        choice(bolt(), 0, 8),
    ];
    let config = search_config(16, Some(40), 99);
    let count = count_possible_decks(&choices, 16, None, DEFAULT_ESTIMATE_CUTOFF);
    assert!(!count.estimated);

    let decks = brute_force_decks(&choices, &config, &mut NoProgress);
    assert_eq!(decks.len(), 40.min(count.total as usize));

    let ranked = rank_decks(&decks, &config, &ScoreWeights::default(), &mut NoProgress);
    assert_eq!(ranked.len(), decks.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].average_score >= pair[1].average_score);
    }
    // The winner has to be able to cast something
    assert!(ranked[0].average_spells_cast > 0.0);
}

#[test]
fn test_same_seed_produces_same_ranking() {
    let choices = vec![
        choice(forest(), 6, 10),
        choice(elf(), 0, 6),
        choice(bolt(), 0, 6),
    ];
    let config = search_config(14, Some(10), 2024);
    let weights = ScoreWeights::default();

    let run = || {
        let decks = brute_force_decks(&choices, &config, &mut NoProgress);
        rank_decks(&decks, &config, &weights, &mut NoProgress)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_decklist_pool_feeds_search() {
    let db = CardDatabase::from_cards(vec![forest(), elf(), bolt()]);
    let entries = parse_decklist_lines(["Forest", "4 Elf;1.5", "2 Bolt"]).unwrap();
    let choices =
        choices_from_decklist(&entries, &db, DecklistMode::Pool { deck_size: 8 }).unwrap();

    let config = search_config(8, None, 3);
    let decks = brute_force_decks(&choices, &config, &mut NoProgress);
    let count = count_possible_decks(&choices, 8, None, DEFAULT_ESTIMATE_CUTOFF);
    assert_eq!(count.total, decks.len() as u64);
    // Elf 0-4, Bolt 0-2, Forest fills the rest
    assert_eq!(decks.len(), 15);
    assert!(decks.iter().all(|d| d.size() == 8));
}

#[test]
fn test_simulate_deck_matches_manual_stream() {
    let deck = Deck::from_counts(vec![(forest(), 8), (elf(), 6), (bolt(), 2)]);
    let config = SimulationConfig {
        games: 25,
        turns: 5,
        seed: Some(8),
    };
    let summary = simulate_deck(&deck, &config, &ScoreWeights::default());

    let mut rng = GameRng::new(Some(8));
    let total_spells: u32 = (0..25).map(|_| run_game(&deck, 5, &mut rng).spells_cast).sum();
    assert!((summary.average_spells_cast - total_spells as f64 / 25.0).abs() < 1e-9);
}
