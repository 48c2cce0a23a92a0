use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Mana colors in Magic: The Gathering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaColor {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

impl ManaColor {
    pub const ALL: [ManaColor; 6] = [
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
        ManaColor::Colorless,
    ];

    /// Convert to the single character representation
    pub fn to_char(&self) -> char {
        match self {
            ManaColor::White => 'W',
            ManaColor::Blue => 'U',
            ManaColor::Black => 'B',
            ManaColor::Red => 'R',
            ManaColor::Green => 'G',
            ManaColor::Colorless => 'C',
        }
    }

    fn bit(&self) -> u8 {
        match self {
            ManaColor::White => ColorFlags::WHITE,
            ManaColor::Blue => ColorFlags::BLUE,
            ManaColor::Black => ColorFlags::BLACK,
            ManaColor::Red => ColorFlags::RED,
            ManaColor::Green => ColorFlags::GREEN,
            ManaColor::Colorless => ColorFlags::COLORLESS,
        }
    }
}

impl fmt::Display for ManaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Set of mana colors packed into a byte (no allocations)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorFlags(pub u8);

impl ColorFlags {
    pub const WHITE: u8 = 1 << 0;
    pub const BLUE: u8 = 1 << 1;
    pub const BLACK: u8 = 1 << 2;
    pub const RED: u8 = 1 << 3;
    pub const GREEN: u8 = 1 << 4;
    pub const COLORLESS: u8 = 1 << 5;

    pub fn new() -> Self {
        ColorFlags(0)
    }

    pub fn from_colors(colors: &[ManaColor]) -> Self {
        let mut flags = ColorFlags::new();
        for color in colors {
            flags.insert(*color);
        }
        flags
    }

    #[inline]
    pub fn insert(&mut self, color: ManaColor) {
        self.0 |= color.bit();
    }

    #[inline]
    pub fn contains(&self, color: ManaColor) -> bool {
        self.0 & color.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of distinct colors in the set
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// First color in WUBRGC order
    pub fn first_color(&self) -> Option<ManaColor> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = ManaColor> + '_ {
        ManaColor::ALL.iter().copied().filter(move |c| self.contains(*c))
    }
}

impl fmt::Display for ColorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "colorless");
        }
        let symbols: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", symbols.join(","))
    }
}

/// Mana cost for a card: one entry per colored pip plus a generic remainder
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    #[serde(default)]
    pub symbols: Vec<ManaColor>,
    #[serde(default)]
    pub generic: u32,
}

impl ManaCost {
    pub fn new(symbols: &[ManaColor], generic: u32) -> Self {
        ManaCost {
            symbols: symbols.to_vec(),
            generic,
        }
    }

    pub fn total_value(&self) -> u32 {
        self.symbols.len() as u32 + self.generic
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic > 0 || self.symbols.is_empty() {
            write!(f, "{{{}}}", self.generic)?;
        }
        for symbol in &self.symbols {
            write!(f, "{{{}}}", symbol)?;
        }
        Ok(())
    }
}

/// Behavioral tags consumed by scoring and the casting hold rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardTag {
    Removal,
    #[serde(alias = "counter")]
    Counterspell,
    #[serde(alias = "draw")]
    CardDraw,
    Finisher,
}

impl CardTag {
    /// Tags that let a non-creature spell be cast with an empty board
    pub fn is_proactive_without_creatures(&self) -> bool {
        matches!(
            self,
            CardTag::Removal | CardTag::Counterspell | CardTag::CardDraw
        )
    }
}

impl fmt::Display for CardTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardTag::Removal => "removal",
            CardTag::Counterspell => "counterspell",
            CardTag::CardDraw => "card-draw",
            CardTag::Finisher => "finisher",
        };
        write!(f, "{}", name)
    }
}

/// Base card properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseCard {
    pub name: String,
    #[serde(default)]
    pub mana_cost: ManaCost,
    #[serde(default)]
    pub mana_value: u32,
    #[serde(default)]
    pub colors: Vec<ManaColor>,
    #[serde(default)]
    pub tags: Vec<CardTag>,
    #[serde(default)]
    pub impact: f64,
}

impl BaseCard {
    fn named(name: &str, mana_cost: ManaCost) -> Self {
        let mut colors = mana_cost.symbols.clone();
        colors.sort();
        colors.dedup();
        BaseCard {
            name: name.to_string(),
            mana_value: mana_cost.total_value(),
            mana_cost,
            colors,
            tags: Vec::new(),
            impact: 0.0,
        }
    }
}

// Cards are map keys, so the float impact weight compares by bit pattern.
impl PartialEq for BaseCard {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.mana_cost == other.mana_cost
            && self.mana_value == other.mana_value
            && self.colors == other.colors
            && self.tags == other.tags
            && self.impact.to_bits() == other.impact.to_bits()
    }
}

impl Eq for BaseCard {}

impl Hash for BaseCard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.mana_cost.hash(state);
        self.mana_value.hash(state);
        self.colors.hash(state);
        self.tags.hash(state);
        self.impact.to_bits().hash(state);
    }
}

/// Land card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandCard {
    #[serde(flatten)]
    pub base: BaseCard,
    /// Colors the land taps for; empty means colorless
    #[serde(default)]
    pub produces: Vec<ManaColor>,
    #[serde(default)]
    pub is_basic: bool,
    #[serde(default)]
    pub enters_tapped: bool,
}

/// Creature card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureCard {
    #[serde(flatten)]
    pub base: BaseCard,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub toughness: u32,
}

/// Any other nonland card (instant, sorcery, enchantment, artifact)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellCard {
    #[serde(flatten)]
    pub base: BaseCard,
}

/// Unified card enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "card_type", rename_all = "lowercase")]
pub enum Card {
    Land(LandCard),
    Creature(CreatureCard),
    Spell(SpellCard),
}

impl Card {
    /// Nonbasic land producing `produces` (colorless when empty)
    pub fn land(name: &str, produces: &[ManaColor]) -> Card {
        Card::Land(LandCard {
            base: BaseCard::named(name, ManaCost::default()),
            produces: produces.to_vec(),
            is_basic: false,
            enters_tapped: false,
        })
    }

    pub fn basic_land(name: &str, color: ManaColor) -> Card {
        Card::Land(LandCard {
            base: BaseCard::named(name, ManaCost::default()),
            produces: vec![color],
            is_basic: true,
            enters_tapped: false,
        })
    }

    pub fn creature(name: &str, mana_cost: ManaCost, power: u32, toughness: u32) -> Card {
        Card::Creature(CreatureCard {
            base: BaseCard::named(name, mana_cost),
            power,
            toughness,
        })
    }

    pub fn spell(name: &str, mana_cost: ManaCost) -> Card {
        Card::Spell(SpellCard {
            base: BaseCard::named(name, mana_cost),
        })
    }

    pub fn with_tags(mut self, tags: &[CardTag]) -> Card {
        let base = self.base_mut();
        base.tags = tags.to_vec();
        base.tags.sort();
        base.tags.dedup();
        self
    }

    pub fn with_impact(mut self, impact: f64) -> Card {
        self.base_mut().impact = impact;
        self
    }

    /// Marks a land as entering the battlefield tapped; no effect on nonlands
    pub fn entering_tapped(mut self) -> Card {
        if let Card::Land(land) = &mut self {
            land.enters_tapped = true;
        }
        self
    }

    /// Reconciles mana value with the itemized cost and fills in color
    /// identity when a hand-written card record left them out. A mana value
    /// above the itemized cost becomes generic mana.
    pub fn normalized(mut self) -> Card {
        let base = self.base_mut();
        let itemized = base.mana_cost.total_value();
        if base.mana_value > itemized {
            base.mana_cost.generic += base.mana_value - itemized;
        }
        base.mana_value = base.mana_cost.total_value();
        if base.colors.is_empty() {
            base.colors = base.mana_cost.symbols.clone();
            base.colors.sort();
            base.colors.dedup();
        }
        base.tags.sort();
        base.tags.dedup();
        self
    }

    pub fn base(&self) -> &BaseCard {
        match self {
            Card::Land(c) => &c.base,
            Card::Creature(c) => &c.base,
            Card::Spell(c) => &c.base,
        }
    }

    fn base_mut(&mut self) -> &mut BaseCard {
        match self {
            Card::Land(c) => &mut c.base,
            Card::Creature(c) => &mut c.base,
            Card::Spell(c) => &mut c.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn mana_value(&self) -> u32 {
        self.base().mana_value
    }

    pub fn mana_cost(&self) -> &ManaCost {
        &self.base().mana_cost
    }

    pub fn tags(&self) -> &[CardTag] {
        &self.base().tags
    }

    pub fn has_tag(&self, tag: CardTag) -> bool {
        self.base().tags.contains(&tag)
    }

    pub fn impact(&self) -> f64 {
        self.base().impact
    }

    pub fn is_land(&self) -> bool {
        matches!(self, Card::Land(_))
    }

    pub fn is_creature(&self) -> bool {
        matches!(self, Card::Creature(_))
    }

    pub fn is_basic_land(&self) -> bool {
        matches!(self, Card::Land(l) if l.is_basic)
    }

    pub fn enters_tapped(&self) -> bool {
        matches!(self, Card::Land(l) if l.enters_tapped)
    }

    /// Colors a land can tap for. Lands listing no colors tap for {C};
    /// nonlands produce nothing.
    pub fn produced_colors(&self) -> ColorFlags {
        match self {
            Card::Land(l) if l.produces.is_empty() => ColorFlags(ColorFlags::COLORLESS),
            Card::Land(l) => ColorFlags::from_colors(&l.produces),
            _ => ColorFlags::new(),
        }
    }

    /// Color identity as a set (required colors for spells)
    pub fn color_flags(&self) -> ColorFlags {
        ColorFlags::from_colors(&self.base().colors)
    }

    /// Heuristic board presence of a resolved creature; zero for noncreatures
    pub fn board_impact(&self) -> f64 {
        match self {
            Card::Creature(c) => {
                c.power as f64 + c.toughness as f64 / 2.0 + c.base.impact
            }
            _ => 0.0,
        }
    }

    /// Heuristic value of a resolved noncreature spell; zero for creatures and lands
    pub fn spell_impact(&self) -> f64 {
        match self {
            Card::Spell(s) => s.base.impact + s.base.mana_value as f64 / 2.0,
            _ => 0.0,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Card::Land(_) => "land",
            Card::Creature(_) => "creature",
            Card::Spell(_) => "spell",
        }
    }
}
