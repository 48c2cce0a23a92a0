use crate::card::CardChoice;
use crate::search::rules::DeckRules;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_ESTIMATE_CUTOFF: u64 = 10_000_000;

/// Size of a search space, exact unless `estimated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckCount {
    pub total: u64,
    pub estimated: bool,
    pub lower_bound: u64,
    pub upper_bound: u64,
}

impl DeckCount {
    fn exact(total: u64) -> Self {
        DeckCount {
            total,
            estimated: false,
            lower_bound: total,
            upper_bound: total,
        }
    }

    fn capped(cutoff: u64) -> Self {
        DeckCount {
            total: cutoff,
            estimated: true,
            lower_bound: cutoff,
            upper_bound: cutoff.saturating_add(cutoff),
        }
    }
}

impl fmt::Display for DeckCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower_bound == self.upper_bound {
            write!(f, "{}", abbreviate(self.lower_bound))?;
        } else {
            write!(
                f,
                "{}-{}",
                abbreviate(self.lower_bound),
                abbreviate(self.upper_bound)
            )?;
        }
        if self.estimated {
            write!(f, " (estimated)")?;
        }
        Ok(())
    }
}

/// Short human form: 950, 12K, 3.4M ...
pub fn abbreviate(value: u64) -> String {
    const UNITS: [&str; 5] = ["", "K", "M", "B", "T"];
    if value < 1000 {
        return value.to_string();
    }
    let mut scaled = value as f64;
    for unit in UNITS {
        if scaled < 1000.0 {
            return format!("{:.1}{}", scaled, unit);
        }
        scaled /= 1000.0;
    }
    format!("{:.1}P", scaled)
}

/// Count compositions of `deck_size` cards drawn from `choices`.
///
/// Without rules this is a capped bounded-knapsack DP over deck size; with
/// rules it is a memoized depth-first count over (slot, remaining, lands,
/// creatures). Either way a count reaching the cutoff is reported as an
/// estimate instead of an exact number.
pub fn count_possible_decks(
    choices: &[CardChoice],
    deck_size: usize,
    rules: Option<&DeckRules>,
    estimate_cutoff: u64,
) -> DeckCount {
    let cutoff = estimate_cutoff.max(1);
    let count = match rules {
        Some(rules) if !rules.is_unbounded() => {
            ConstrainedCounter::new(choices, rules, cutoff).run(deck_size)
        }
        _ => count_unconstrained(choices, deck_size, cutoff),
    };
    debug!(
        "Counted {} compositions of {} cards over {} choices",
        count,
        deck_size,
        choices.len()
    );
    count
}

fn count_unconstrained(choices: &[CardChoice], deck_size: usize, cutoff: u64) -> DeckCount {
    // ways[n] = compositions of the choices seen so far totalling n cards
    let mut ways = vec![0u64; deck_size + 1];
    ways[0] = 1;

    for choice in choices {
        let mut next = vec![0u64; deck_size + 1];
        for (placed, &current) in ways.iter().enumerate() {
            if current == 0 {
                continue;
            }
            for count in choice.options() {
                let total = placed + count;
                if total > deck_size {
                    break;
                }
                next[total] = next[total].saturating_add(current).min(cutoff);
            }
        }
        ways = next;
    }

    let total = ways[deck_size];
    if total >= cutoff {
        DeckCount::capped(cutoff)
    } else {
        DeckCount::exact(total)
    }
}

type MemoKey = (usize, usize, usize, usize);

struct ConstrainedCounter<'a> {
    choices: &'a [CardChoice],
    rules: &'a DeckRules,
    cutoff: u64,
    suffix_min: Vec<usize>,
    suffix_max: Vec<usize>,
    memo: HashMap<MemoKey, u64>,
    aborted: bool,
}

impl<'a> ConstrainedCounter<'a> {
    fn new(choices: &'a [CardChoice], rules: &'a DeckRules, cutoff: u64) -> Self {
        let n = choices.len();
        let mut suffix_min = vec![0; n + 1];
        let mut suffix_max = vec![0; n + 1];
        for i in (0..n).rev() {
            suffix_min[i] = suffix_min[i + 1] + choices[i].min_count;
            suffix_max[i] = suffix_max[i + 1] + choices[i].max_count;
        }
        ConstrainedCounter {
            choices,
            rules,
            cutoff,
            suffix_min,
            suffix_max,
            memo: HashMap::new(),
            aborted: false,
        }
    }

    fn run(mut self, deck_size: usize) -> DeckCount {
        let total = self.count(0, deck_size, 0, 0);
        if self.aborted {
            DeckCount::capped(self.cutoff)
        } else {
            DeckCount::exact(total)
        }
    }

    fn count(&mut self, slot: usize, remaining: usize, lands: usize, creatures: usize) -> u64 {
        if self.aborted {
            return 0;
        }
        if self.rules.max_lands.map_or(false, |m| lands > m)
            || self.rules.max_creatures.map_or(false, |m| creatures > m)
        {
            return 0;
        }
        if slot == self.choices.len() {
            return (remaining == 0 && self.rules.validate(lands, creatures)) as u64;
        }
        if remaining < self.suffix_min[slot] || remaining > self.suffix_max[slot] {
            return 0;
        }

        // Unbounded dimensions never change the answer, keep them out of the key
        let key = (
            slot,
            remaining,
            if self.rules.bounds_lands() { lands } else { 0 },
            if self.rules.bounds_creatures() { creatures } else { 0 },
        );
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }

        let choice = &self.choices[slot];
        let mut total: u64 = 0;
        for count in choice.options() {
            if count > remaining {
                break;
            }
            total = total.saturating_add(self.count(
                slot + 1,
                remaining - count,
                lands + choice.lands_for(count),
                creatures + choice.creatures_for(count),
            ));
            if total > self.cutoff {
                self.aborted = true;
                return total;
            }
        }

        if !self.aborted {
            self.memo.insert(key, total);
        }
        total
    }
}
