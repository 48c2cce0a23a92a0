use crate::card::{CardChoice, CardDatabase, CardDatabaseError, ChoiceError};
use std::path::Path;
use thiserror::Error;

/// Basic lands may fill a deck; everything else obeys the four-copy rule
pub const BASIC_LAND_NAMES: [&str; 6] = ["Plains", "Island", "Swamp", "Mountain", "Forest", "Wastes"];

const MAX_COPIES: usize = 4;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid deck format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },
    #[error("Invalid impact score at line {line}: '{value}' is not a number")]
    InvalidImpact { line: usize, value: String },
    #[error("Card database error: {0}")]
    DatabaseError(#[from] CardDatabaseError),
    #[error("Counts are required for fixed decklists (missing for '{name}')")]
    MissingCount { name: String },
    #[error("Invalid card choice: {0}")]
    InvalidChoice(#[from] ChoiceError),
}

/// One decklist line. `count` is absent for name-only lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DecklistEntry {
    pub name: String,
    pub count: Option<usize>,
    pub impact: Option<f64>,
}

/// How decklist counts turn into search ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecklistMode {
    /// Counts are an upper bound; the search may run fewer copies
    Pool { deck_size: usize },
    /// Counts are kept exactly as written
    Fixed,
}

/// Parse MTGO/Arena style lines: "4 Lightning Bolt", "Forest", with an
/// optional ";impact" suffix. Blank lines, comments (# or //), sideboard
/// headers and "SB:" prefixes are tolerated.
pub fn parse_decklist_lines<'a, I>(lines: I) -> Result<Vec<DecklistEntry>, DeckError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entries = Vec::new();

    for (line_num, raw) in lines.into_iter().enumerate() {
        let mut line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        if line.to_lowercase().starts_with("sideboard") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("SB:") {
            line = rest.trim();
        }

        let (body, impact) = match line.rsplit_once(';') {
            Some((body, score)) => {
                let score = score.trim();
                let impact: f64 = score.parse().map_err(|_| DeckError::InvalidImpact {
                    line: line_num + 1,
                    value: score.to_string(),
                })?;
                (body.trim(), Some(impact))
            }
            None => (line, None),
        };

        let (count, name) = match body.split_once(char::is_whitespace) {
            Some((first, rest)) if first.chars().all(|c| c.is_ascii_digit()) => {
                let count: usize = first.parse().map_err(|_| DeckError::InvalidFormat {
                    line: line_num + 1,
                    reason: format!("'{}' is not a valid number", first),
                })?;
                (Some(count), rest.trim())
            }
            _ => (None, body),
        };

        if name.is_empty() {
            return Err(DeckError::InvalidFormat {
                line: line_num + 1,
                reason: "Missing card name".to_string(),
            });
        }

        entries.push(DecklistEntry {
            name: name.to_string(),
            count,
            impact,
        });
    }

    Ok(entries)
}

/// Read and parse a decklist file
pub fn parse_deck_file<P: AsRef<Path>>(path: P) -> Result<Vec<DecklistEntry>, DeckError> {
    let content = std::fs::read_to_string(path)?;
    parse_decklist_lines(content.lines())
}

/// Sum of written counts; the natural deck size of a fixed list
pub fn fixed_deck_size(entries: &[DecklistEntry]) -> usize {
    entries.iter().filter_map(|e| e.count).sum()
}

/// Resolve entries against `database` and derive each card's count range
pub fn choices_from_decklist(
    entries: &[DecklistEntry],
    database: &CardDatabase,
    mode: DecklistMode,
) -> Result<Vec<CardChoice>, DeckError> {
    let mut choices = Vec::with_capacity(entries.len());

    for entry in entries {
        let mut card = database.get_card(&entry.name)?;
        if let Some(impact) = entry.impact {
            card = card.with_impact(impact);
        }
        let is_basic = card.is_basic_land() || BASIC_LAND_NAMES.contains(&card.name());

        let choice = match mode {
            DecklistMode::Fixed => {
                let count = entry.count.ok_or_else(|| DeckError::MissingCount {
                    name: entry.name.clone(),
                })?;
                CardChoice::fixed(card, count)
            }
            DecklistMode::Pool { deck_size } => {
                let mut max_count = match entry.count {
                    Some(count) => count,
                    None if is_basic => deck_size,
                    None => MAX_COPIES,
                };
                if !is_basic {
                    max_count = max_count.min(MAX_COPIES);
                }
                CardChoice::new(card, 0, max_count)?
            }
        };
        choices.push(choice);
    }

    Ok(choices)
}
