use crate::card::Deck;
use serde::{Deserialize, Serialize};

/// Optional deck-wide bounds on land and creature totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRules {
    #[serde(default)]
    pub min_lands: Option<usize>,
    #[serde(default)]
    pub max_lands: Option<usize>,
    #[serde(default)]
    pub min_creatures: Option<usize>,
    #[serde(default)]
    pub max_creatures: Option<usize>,
}

impl DeckRules {
    /// False iff a configured bound is violated
    pub fn validate(&self, lands: usize, creatures: usize) -> bool {
        within(lands, self.min_lands, self.max_lands)
            && within(creatures, self.min_creatures, self.max_creatures)
    }

    pub fn validate_deck(&self, deck: &Deck) -> bool {
        self.validate(deck.land_count(), deck.creature_count())
    }

    /// Can some final total in `[low, high]` still satisfy the land bounds?
    pub fn lands_reachable(&self, low: usize, high: usize) -> bool {
        overlaps(low, high, self.min_lands, self.max_lands)
    }

    pub fn creatures_reachable(&self, low: usize, high: usize) -> bool {
        overlaps(low, high, self.min_creatures, self.max_creatures)
    }

    pub fn bounds_lands(&self) -> bool {
        self.min_lands.is_some() || self.max_lands.is_some()
    }

    pub fn bounds_creatures(&self) -> bool {
        self.min_creatures.is_some() || self.max_creatures.is_some()
    }

    pub fn is_unbounded(&self) -> bool {
        !self.bounds_lands() && !self.bounds_creatures()
    }
}

fn within(value: usize, min: Option<usize>, max: Option<usize>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

fn overlaps(low: usize, high: usize, min: Option<usize>, max: Option<usize>) -> bool {
    min.map_or(true, |m| high >= m) && max.map_or(true, |m| low <= m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_bounds_never_reject() {
        let rules = DeckRules::default();
        assert!(rules.validate(0, 0));
        assert!(rules.validate(60, 60));
        assert!(rules.is_unbounded());
    }

    #[test]
    fn test_each_bound_rejects() {
        let rules = DeckRules {
            min_lands: Some(2),
            max_lands: Some(4),
            min_creatures: Some(1),
            max_creatures: Some(3),
        };
        assert!(rules.validate(2, 1));
        assert!(rules.validate(4, 3));
        assert!(!rules.validate(1, 2));
        assert!(!rules.validate(5, 2));
        assert!(!rules.validate(3, 0));
        assert!(!rules.validate(3, 4));
    }

    #[test]
    fn test_reachability() {
        let rules = DeckRules {
            min_lands: Some(17),
            max_lands: Some(24),
            ..DeckRules::default()
        };
        assert!(rules.lands_reachable(10, 17));
        assert!(!rules.lands_reachable(0, 16));
        assert!(!rules.lands_reachable(25, 30));
        assert!(rules.creatures_reachable(0, 0));
    }
}
