use crate::card::{CardChoice, CardDatabase, CardDatabaseError};
use crate::config::{load_rules, ConfigError, OptimizerConfig};
use crate::progress::BarProgress;
use crate::search::{
    brute_force_decks, count_possible_decks, rank_decks, DeckCount, DeckRules, SearchConfig,
};
use crate::simulation::{
    choices_from_decklist, describe_card_rating, example_simulation_trace, fixed_deck_size,
    format_trace, parse_deck_file, render_deck_count, summary_string, DeckError, DecklistMode,
    ScoreWeights, SimulationSummary,
};
use chrono::{DateTime, Local};
use clap::{ArgGroup, Parser};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compositions simulated when no limit is given
pub const DEFAULT_SIMULATION_LIMIT: u64 = 5000;

const DEFAULT_RULES_FILE: &str = "deck_rules.json";

#[derive(Parser, Debug)]
#[command(name = "mtg-optimize")]
#[command(about = "Search deck compositions and rank them by simulated early-game play", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["config", "decklist"])))]
pub struct Cli {
    /// Deck search JSON config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// MTGO/Arena-style decklist
    #[arg(long)]
    pub decklist: Option<PathBuf>,

    /// Card database used to resolve decklist names
    #[arg(long, default_value = "cards.json")]
    pub cards: PathBuf,

    /// Target deck size (default: 60, or the list's total with --fixed-deck)
    #[arg(long)]
    pub deck_size: Option<usize>,

    /// JSON file with deck construction rules
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Maximum deck combinations to explore
    #[arg(long)]
    pub brute_limit: Option<usize>,

    /// Keep decklist counts exactly as written instead of treating them as a pool
    #[arg(long)]
    pub fixed_deck: bool,

    /// How many top decks to print
    #[arg(long, default_value = "1")]
    pub top: usize,

    /// Games simulated per deck
    #[arg(short, long)]
    pub games: Option<usize>,

    /// Turns per simulated game
    #[arg(short, long)]
    pub turns: Option<u32>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Counts above this are reported as estimates
    #[arg(long)]
    pub estimate_cutoff: Option<u64>,

    /// Print one narrated game for the best deck
    #[arg(long)]
    pub trace: bool,

    /// Write a JSON report of the top decks
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Decklist error: {0}")]
    Deck(#[from] DeckError),
    #[error("Card database error: {0}")]
    Database(#[from] CardDatabaseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No valid decks can be constructed with the supplied constraints")]
    NoValidDecks,
    #[error("No valid decks found; adjust constraints or deck size")]
    NoDecksFound,
}

/// Resolved inputs for one run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub choices: Vec<CardChoice>,
    pub search: SearchConfig,
    pub weights: ScoreWeights,
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Local>,
    deck_count: DeckCount,
    search: &'a SearchConfig,
    weights: &'a ScoreWeights,
    decks: &'a [SimulationSummary],
}

/// `deck_rules.json` next to the decklist, else in the working directory
fn default_rules_path(decklist: Option<&Path>) -> Option<PathBuf> {
    let beside_list = decklist
        .and_then(Path::parent)
        .map(|dir| dir.join(DEFAULT_RULES_FILE));
    beside_list
        .into_iter()
        .chain(std::iter::once(PathBuf::from(DEFAULT_RULES_FILE)))
        .find(|path| path.is_file())
}

/// Merge file config, decklist and flags into a plan. Flags win.
pub fn prepare(cli: &Cli) -> Result<RunPlan, CliError> {
    let mut rules: Option<DeckRules> = match &cli.rules {
        Some(path) => Some(load_rules(path)?),
        None => None,
    };

    let (choices, mut search, weights) = if let Some(path) = &cli.config {
        let config = OptimizerConfig::from_file(path)?;
        let choices = config.choices()?;
        let mut search = config.search_config();
        if rules.is_none() {
            rules = config.deck_rules;
        }
        if let Some(size) = cli.deck_size {
            search.deck_size = size;
        }
        if cli.brute_limit.is_some() {
            search.brute_force_limit = cli.brute_limit;
        }
        (choices, search, config.weights)
    } else {
        let decklist = cli.decklist.as_deref().unwrap_or_else(|| Path::new(""));
        let entries = parse_deck_file(decklist)?;
        let database = CardDatabase::from_file(&cli.cards)?;
        debug!("Loaded {} cards from {}", database.card_count(), cli.cards.display());

        let (deck_size, mode, limit) = if cli.fixed_deck {
            let size = cli.deck_size.unwrap_or_else(|| fixed_deck_size(&entries));
            (size, DecklistMode::Fixed, cli.brute_limit.or(Some(1)))
        } else {
            let size = cli.deck_size.unwrap_or(60);
            (size, DecklistMode::Pool { deck_size: size }, cli.brute_limit)
        };
        let choices = choices_from_decklist(&entries, &database, mode)?;
        let search = SearchConfig {
            deck_size,
            brute_force_limit: limit,
            ..SearchConfig::default()
        };
        (choices, search, ScoreWeights::default())
    };

    if rules.is_none() {
        if let Some(path) = default_rules_path(cli.decklist.as_deref()) {
            info!("Using deck rules from {}", path.display());
            rules = Some(load_rules(path)?);
        }
    }

    search.deck_rules = rules;
    if let Some(games) = cli.games {
        search.simulation.games = games;
    }
    if let Some(turns) = cli.turns {
        search.simulation.turns = turns;
    }
    if cli.seed.is_some() {
        search.simulation.seed = cli.seed;
    }
    if let Some(cutoff) = cli.estimate_cutoff {
        search.estimate_cutoff = cutoff;
    }

    Ok(RunPlan {
        choices,
        search,
        weights,
    })
}

/// Clamp a requested limit to `[1, total]`, or pick the default sample size
pub fn resolve_limit(requested: Option<usize>, total: u64) -> usize {
    let limit = match requested {
        Some(limit) => (limit as u64).clamp(1, total.max(1)),
        None => DEFAULT_SIMULATION_LIMIT.min(total),
    };
    usize::try_from(limit).unwrap_or(usize::MAX)
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let start = std::time::Instant::now();
    let mut plan = prepare(&cli)?;

    let count = count_possible_decks(
        &plan.choices,
        plan.search.deck_size,
        plan.search.deck_rules.as_ref(),
        plan.search.estimate_cutoff,
    );
    if count.total == 0 {
        return Err(CliError::NoValidDecks);
    }
    let limit = resolve_limit(plan.search.brute_force_limit, count.total);
    plan.search.brute_force_limit = Some(limit);
    println!(
        "Found {} valid deck combinations, simulating {}",
        render_deck_count(&count),
        limit
    );

    let mut search_bar = BarProgress::new("Deck search");
    let decks = brute_force_decks(&plan.choices, &plan.search, &mut search_bar);
    search_bar.finish();
    if decks.is_empty() {
        return Err(CliError::NoDecksFound);
    }

    let mut rank_bar = BarProgress::new("Simulations");
    let summaries = rank_decks(&decks, &plan.search, &plan.weights, &mut rank_bar);
    rank_bar.finish();
    if summaries.is_empty() {
        return Err(CliError::NoDecksFound);
    }

    let top = &summaries[..cli.top.min(summaries.len())];
    for (idx, summary) in top.iter().enumerate() {
        println!("\n=== Deck {} ===", idx + 1);
        println!("{}", summary_string(summary));
    }

    if cli.trace {
        if let Some(best) = summaries.first() {
            println!("\n=== Example game ===");
            let trace = example_simulation_trace(&best.deck, &plan.search.simulation);
            println!("{}", format_trace(&trace));
            println!("\n=== Card ratings ===");
            for entry in best.deck.entries() {
                println!("  {}", describe_card_rating(&entry.card));
            }
        }
    }

    if let Some(path) = &cli.output {
        let report = Report {
            generated_at: Local::now(),
            deck_count: count,
            search: &plan.search,
            weights: &plan.weights,
            decks: top,
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        println!("\nReport saved to: {}", path.display());
    }

    println!(
        "\nCompleted in {:.2?} ({} decks x {} games)",
        start.elapsed(),
        decks.len(),
        plan.search.simulation.games
    );
    Ok(())
}
