//! Plain-text rendering of simulation output for the command line.

use crate::card::Card;
use crate::search::DeckCount;
use crate::simulation::summary::SimulationSummary;
use crate::simulation::trace::GameTrace;

/// Averages followed by the deck list
pub fn summary_string(summary: &SimulationSummary) -> String {
    let mut lines = vec![
        format!("Avg score: {:.2}", summary.average_score),
        format!("Spells cast: {:.2}", summary.average_spells_cast),
        format!("Mana spent: {:.2}", summary.average_mana_spent),
        format!("Board impact: {:.2}", summary.average_board_impact),
        format!("Spell impact: {:.2}", summary.average_spell_impact),
        format!(
            "Interaction/counters/draw/finishers: {:.2}/{:.2}/{:.2}/{:.2}",
            summary.average_interaction,
            summary.average_counterspells,
            summary.average_card_draw,
            summary.average_finishers
        ),
        format!("Color screw turns: {:.2}", summary.average_color_screw),
        format!("Missed land drops: {:.2}", summary.average_land_miss),
        "Deck:".to_string(),
    ];
    for entry in summary.deck.entries() {
        let card = &entry.card;
        lines.push(format!(
            "  {}x {} ({}, cost={}, colors={})",
            entry.count,
            card.name(),
            card.type_name(),
            card.mana_value(),
            card.color_flags()
        ));
    }
    lines.join("\n")
}

pub fn format_trace(trace: &GameTrace) -> String {
    let mut lines = vec![format!("Opening hand: {}", trace.opening_hand.join(", "))];
    for turn in &trace.turns {
        let mut header = format!(
            "Turn {}: {} spell(s), {} mana",
            turn.turn, turn.spells_cast, turn.mana_spent
        );
        if turn.color_screwed {
            header.push_str(" [color screwed]");
        }
        lines.push(header);
        for action in &turn.actions {
            lines.push(format!("  - {}", action));
        }
    }
    lines.join("\n")
}

/// One-line breakdown of how the scorer values a card
pub fn describe_card_rating(card: &Card) -> String {
    let mut parts = vec![format!("cost {}", card.mana_cost())];
    match card {
        Card::Land(_) => parts.push(format!("taps for {}", card.produced_colors())),
        Card::Creature(c) => {
            parts.push(format!("{}/{}", c.power, c.toughness));
            parts.push(format!("board impact {:.2}", card.board_impact()));
        }
        Card::Spell(_) => parts.push(format!("spell impact {:.2}", card.spell_impact())),
    }
    if !card.tags().is_empty() {
        let tags: Vec<String> = card.tags().iter().map(|t| t.to_string()).collect();
        parts.push(format!("tags: {}", tags.join(", ")));
    }
    format!("{} [{}]: {}", card.name(), card.type_name(), parts.join("; "))
}

/// "12.5K", "5-10 (estimated)" and the like
pub fn render_deck_count(count: &DeckCount) -> String {
    count.to_string()
}
