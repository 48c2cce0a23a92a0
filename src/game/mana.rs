use crate::card::{ColorFlags, ManaColor, ManaCost};
use crate::game::zones::LandPermanent;
use std::fmt;

/// What a tapped land paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    Colored(ManaColor),
    Generic,
}

/// One land tapped as part of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandTap {
    /// Index into the land slice the plan was made for
    pub land: usize,
    /// Color of mana the land is tapped for
    pub color: ManaColor,
    pub pays: Payment,
}

/// Concrete assignment of lands to a cost
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentPlan {
    pub taps: Vec<LandTap>,
}

impl PaymentPlan {
    pub fn lands_used(&self) -> usize {
        self.taps.len()
    }

    /// Human readable lines, e.g. "Tapped Forest for G mana"
    pub fn describe(&self, lands: &[LandPermanent]) -> Vec<String> {
        self.taps
            .iter()
            .filter_map(|tap| {
                lands
                    .get(tap.land)
                    .map(|land| format!("Tapped {} for {} mana", land.name(), tap.color))
            })
            .collect()
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payment::Colored(color) => write!(f, "{{{}}}", color),
            Payment::Generic => write!(f, "generic"),
        }
    }
}

/// Colors each land can produce now, empty for tapped lands
fn land_colors(lands: &[LandPermanent]) -> Vec<ColorFlags> {
    lands.iter().map(|l| l.available_colors()).collect()
}

/// Recursive backtracking to assign one unused land to each colored requirement.
/// `picks[i]` receives the land chosen for `requirements[i]`.
fn assign_colored(
    requirements: &[ManaColor],
    req_idx: usize,
    lands: &[ColorFlags],
    used: &mut [bool],
    picks: &mut Vec<usize>,
) -> bool {
    // Base case: all requirements satisfied
    if req_idx >= requirements.len() {
        return true;
    }

    let color = requirements[req_idx];

    for (land_idx, land_colors) in lands.iter().enumerate() {
        if used[land_idx] || !land_colors.contains(color) {
            continue;
        }

        used[land_idx] = true;
        picks.push(land_idx);
        if assign_colored(requirements, req_idx + 1, lands, used, picks) {
            return true;
        }
        picks.pop();
        used[land_idx] = false;
    }

    false
}

/// Does an assignment exist? Leaves no trace of the search behind.
pub fn can_pay(cost: &ManaCost, lands: &[LandPermanent]) -> bool {
    let colors = land_colors(lands);
    let untapped = colors.iter().filter(|c| !c.is_empty()).count();
    if (untapped as u32) < cost.total_value() {
        return false;
    }

    let mut used = vec![false; colors.len()];
    let mut picks = Vec::with_capacity(cost.symbols.len());
    if !assign_colored(&cost.symbols, 0, &colors, &mut used, &mut picks) {
        return false;
    }

    let spare = colors
        .iter()
        .zip(&used)
        .filter(|(c, u)| !c.is_empty() && !**u)
        .count();
    spare as u32 >= cost.generic
}

/// Find lands to pay `cost` without touching their state.
///
/// Colored pips are matched first by depth-first search over untapped lands
/// whose colors intersect the pip; the generic remainder then takes the
/// remaining untapped lands in battlefield order. Exactly
/// `cost.total_value()` lands appear in a successful plan.
pub fn plan_payment(cost: &ManaCost, lands: &[LandPermanent]) -> Option<PaymentPlan> {
    let colors = land_colors(lands);
    let untapped = colors.iter().filter(|c| !c.is_empty()).count();
    if (untapped as u32) < cost.total_value() {
        return None;
    }

    let mut used = vec![false; colors.len()];
    let mut picks = Vec::with_capacity(cost.symbols.len());
    if !assign_colored(&cost.symbols, 0, &colors, &mut used, &mut picks) {
        return None;
    }

    let mut taps: Vec<LandTap> = cost
        .symbols
        .iter()
        .zip(&picks)
        .map(|(color, land)| LandTap {
            land: *land,
            color: *color,
            pays: Payment::Colored(*color),
        })
        .collect();

    let mut generic_remaining = cost.generic;
    for (land_idx, land_colors) in colors.iter().enumerate() {
        if generic_remaining == 0 {
            break;
        }
        if used[land_idx] {
            continue;
        }
        if let Some(first) = land_colors.first_color() {
            used[land_idx] = true;
            taps.push(LandTap {
                land: land_idx,
                color: first,
                pays: Payment::Generic,
            });
            generic_remaining -= 1;
        }
    }

    if generic_remaining > 0 {
        return None;
    }

    Some(PaymentPlan { taps })
}

/// Plan and commit: taps the chosen lands on success, leaves state untouched otherwise
pub fn pay(cost: &ManaCost, lands: &mut [LandPermanent]) -> Option<PaymentPlan> {
    let plan = plan_payment(cost, lands)?;
    for tap in &plan.taps {
        if let Some(land) = lands.get_mut(tap.land) {
            land.tapped = true;
        }
    }
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn island() -> LandPermanent {
        LandPermanent::untapped(Card::basic_land("Island", ManaColor::Blue))
    }

    fn forest() -> LandPermanent {
        LandPermanent::untapped(Card::basic_land("Forest", ManaColor::Green))
    }

    #[test]
    fn test_tapped_land_cannot_pay_spell() {
        let falls = Card::land("Thornwood Falls", &[ManaColor::Green, ManaColor::Blue])
            .entering_tapped();
        let lands = vec![LandPermanent::new(falls)];
        let cost = ManaCost::new(&[ManaColor::Blue], 1);

        assert!(!can_pay(&cost, &lands));
        assert!(plan_payment(&cost, &lands).is_none());
    }

    #[test]
    fn test_missing_color_is_infeasible() {
        let lands = vec![forest(), forest(), forest()];
        let cost = ManaCost::new(&[ManaColor::Red], 0);
        assert!(!can_pay(&cost, &lands));
    }

    #[test]
    fn test_payment_taps_required_lands() {
        let mut lands = vec![island(), forest()];
        let cost = ManaCost::new(&[ManaColor::Green], 1);

        let plan = pay(&cost, &mut lands).expect("Boon should be payable");
        assert_eq!(plan.lands_used(), 2);
        assert!(lands.iter().all(|l| l.tapped));
    }

    #[test]
    fn test_payment_taps_no_more_than_needed() {
        let mut lands = vec![forest(), island(), forest(), island()];
        let cost = ManaCost::new(&[ManaColor::Blue], 1);

        let plan = pay(&cost, &mut lands).expect("payable");
        assert_eq!(plan.lands_used(), 2);
        assert_eq!(lands.iter().filter(|l| l.tapped).count(), 2);
        assert!(lands[1].tapped, "first island pays the blue pip");
        assert!(lands[0].tapped, "first spare land pays generic");
    }

    #[test]
    fn test_backtracks_when_dual_land_is_needed_elsewhere() {
        // Dual first: a greedy pick would spend it on U and strand the G pip
        let dual = LandPermanent::untapped(Card::land(
            "Yavimaya Coast",
            &[ManaColor::Green, ManaColor::Blue],
        ));
        let lands = vec![dual, island()];
        let cost = ManaCost::new(&[ManaColor::Blue, ManaColor::Green], 0);

        let plan = plan_payment(&cost, &lands).expect("U from Island, G from the dual");
        let green = plan
            .taps
            .iter()
            .find(|t| t.pays == Payment::Colored(ManaColor::Green))
            .expect("green pip paid");
        assert_eq!(green.land, 0);
        assert!(lands.iter().all(|l| !l.tapped), "planning never taps");
    }

    #[test]
    fn test_failed_payment_leaves_state_untouched() {
        let mut lands = vec![forest(), island()];
        let cost = ManaCost::new(&[ManaColor::Green, ManaColor::Green], 0);
        assert!(pay(&cost, &mut lands).is_none());
        assert!(lands.iter().all(|l| !l.tapped));
    }

    #[test]
    fn test_free_spell_needs_no_lands() {
        let lands: Vec<LandPermanent> = Vec::new();
        let cost = ManaCost::default();
        assert!(can_pay(&cost, &lands));
        assert_eq!(plan_payment(&cost, &lands), Some(PaymentPlan::default()));
    }

    #[test]
    fn test_describe_names_land_and_color() {
        let lands = vec![LandPermanent::untapped(Card::land(
            "Thriving Grove",
            &[
                ManaColor::White,
                ManaColor::Blue,
                ManaColor::Black,
                ManaColor::Red,
                ManaColor::Green,
            ],
        ))];
        let cost = ManaCost::new(&[ManaColor::Red], 0);
        let plan = plan_payment(&cost, &lands).expect("payable");
        assert_eq!(plan.describe(&lands), vec!["Tapped Thriving Grove for R mana"]);
    }

    #[test]
    fn test_colorless_pip_needs_colorless_source() {
        let wastes = LandPermanent::untapped(Card::land("Wastes", &[]));
        let cost = ManaCost::new(&[ManaColor::Colorless], 0);
        assert!(can_pay(&cost, &[wastes]));
        assert!(!can_pay(&cost, &[forest()]));
    }
}
