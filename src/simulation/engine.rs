use crate::card::{Card, CardTag, Deck};
use crate::game::mana::{can_pay, pay};
use crate::game::state::GameState;
use crate::game::zones::Library;
use crate::rng::GameRng;
use crate::simulation::summary::GameResult;
use crate::simulation::trace::{GameTrace, TraceSink};

pub const OPENING_HAND_SIZE: usize = 7;

/// Shuffle `deck` and play `turns` turns
pub fn run_game(deck: &Deck, turns: u32, rng: &mut GameRng) -> GameResult {
    let mut library = deck.expand();
    rng.shuffle(&mut library);
    play_game(library, turns, None)
}

/// Like [`run_game`], also returning the narrated trace. Consumes the RNG
/// exactly as [`run_game`] does.
pub fn run_game_with_trace(deck: &Deck, turns: u32, rng: &mut GameRng) -> (GameResult, GameTrace) {
    let mut library = deck.expand();
    rng.shuffle(&mut library);
    let mut trace = GameTrace::default();
    let result = play_game(library, turns, Some(&mut trace));
    (result, trace)
}

/// Play a game from an already ordered library (index 0 is the top card).
///
/// Deals the opening hand, then each turn untaps, draws, makes a land drop
/// and casts what it can. No randomness is involved past the shuffle.
pub fn play_game(library: Vec<Card>, turns: u32, trace: Option<&mut GameTrace>) -> GameResult {
    let mut sink = TraceSink::new(trace);
    let mut state = GameState::new(Library::from_cards(library));
    let mut result = GameResult::default();

    state.deal_opening_hand(OPENING_HAND_SIZE);
    sink.opening_hand(state.hand.cards().iter().map(|c| c.name()));

    for _ in 0..turns {
        state.start_turn();
        sink.begin_turn(state.turn);

        draw_step(&mut state, &mut sink);
        land_drop(&mut state, &mut result, &mut sink);
        main_phase(&mut state, &mut result, &mut sink);
    }

    result
}

fn draw_step(state: &mut GameState, sink: &mut TraceSink<'_>) {
    if !state.draw_card() {
        return;
    }
    let drawn = state.hand.cards().last().map(|c| c.name().to_string());
    if let Some(name) = drawn {
        sink.action(|| format!("Drew {}", name));
        sink.turn(|t| t.drew = Some(name));
    }
}

/// Untapped beats tapped, then more colors beats fewer; first in hand wins ties
fn pick_land(state: &GameState) -> Option<usize> {
    let mut best: Option<(usize, (bool, u32))> = None;
    for (idx, card) in state.hand.cards().iter().enumerate() {
        if !card.is_land() {
            continue;
        }
        let key = (!card.enters_tapped(), card.produced_colors().count());
        if best.map_or(true, |(_, best_key)| key > best_key) {
            best = Some((idx, key));
        }
    }
    best.map(|(idx, _)| idx)
}

fn land_drop(state: &mut GameState, result: &mut GameResult, sink: &mut TraceSink<'_>) {
    let played = pick_land(state)
        .and_then(|idx| state.play_land(idx))
        .map(|land| (land.name().to_string(), land.tapped));

    match played {
        Some((name, tapped)) => {
            sink.action(|| {
                if tapped {
                    format!("Played land {} (enters tapped)", name)
                } else {
                    format!("Played land {}", name)
                }
            });
            sink.turn(|t| t.land_played = Some(name));
        }
        None => {
            result.land_drops_missed += 1;
            sink.action(|| "No land to play".to_string());
            sink.turn(|t| t.land_missed = true);
        }
    }
}

/// Noncreature spells without interaction, counter or draw tags wait for a creature
fn is_held(card: &Card, creature_in_play: bool) -> bool {
    !creature_in_play
        && !card.is_creature()
        && !card.tags().iter().any(|t| t.is_proactive_without_creatures())
}

fn main_phase(state: &mut GameState, result: &mut GameResult, sink: &mut TraceSink<'_>) {
    let hand = state.hand.cards();
    let mut order: Vec<usize> = (0..hand.len()).filter(|&i| !hand[i].is_land()).collect();
    // Stable, so equal mana values keep hand order
    order.sort_by(|&a, &b| hand[b].mana_value().cmp(&hand[a].mana_value()));

    let castable = order
        .iter()
        .filter(|&&i| can_pay(hand[i].mana_cost(), state.battlefield.lands()))
        .count();

    // Hand indices stay valid until the cast cards leave hand after the loop;
    // the battlefield sees each cast right away.
    let mut cast = Vec::new();
    for idx in order {
        let card = state.hand.cards()[idx].clone();
        if is_held(&card, state.battlefield.has_creature()) {
            sink.action(|| {
                format!("Held {} until a creature is on the battlefield", card.name())
            });
            continue;
        }
        match pay(card.mana_cost(), state.battlefield.lands_mut()) {
            Some(plan) => {
                for line in plan.describe(state.battlefield.lands()) {
                    sink.action(|| line);
                }
                sink.action(|| format!("Cast {}", card.name()));
                record_cast(&card, result, sink);
                state.resolve(card);
                cast.push(idx);
            }
            None => sink.action(|| format!("Could not pay for {}", card.name())),
        }
    }

    let cast_count = cast.len();
    state.hand.remove_cards(cast);

    let screwed = (castable > 0 && cast_count == 0)
        || (castable == 0 && state.battlefield.untapped_land_count() > 0);
    if screwed {
        result.color_screw_turns += 1;
        sink.action(|| "Color screwed this turn".to_string());
        sink.turn(|t| t.color_screwed = true);
    }
}

fn record_cast(card: &Card, result: &mut GameResult, sink: &mut TraceSink<'_>) {
    let mana = card.mana_value();
    result.spells_cast += 1;
    result.mana_spent += mana;
    if card.is_creature() {
        result.board_impact += card.board_impact();
    } else {
        result.spell_impact += card.spell_impact();
    }
    for tag in card.tags() {
        match tag {
            CardTag::Removal => result.interaction_spells += 1,
            CardTag::Counterspell => result.counter_spells += 1,
            CardTag::CardDraw => result.draw_spells += 1,
            CardTag::Finisher => result.finishers += 1,
        }
    }
    sink.turn(|t| {
        t.spells_cast += 1;
        t.mana_spent += mana;
    });
}
