//! Pankito CLI
//!
//! Command-line flashcard reviewer: manage decks and facts, list what is
//! due, and run interactive review sessions.

mod terminal;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pankito_core::{
    Deck, Fact, NewFact, ReviewQueue, ReviewSession, SessionConfig, Storage,
};
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalPresenter;

/// Database file name inside the data directory
const DB_FILE_NAME: &str = "pankito.db";

/// Pankito - spaced repetition flashcards in the terminal
#[derive(Parser)]
#[command(name = "pankito")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Review flashcards on an ease-factor spaced repetition schedule")]
#[command(long_about = "Pankito schedules each fact from your 0-5 recall score.\n\n\
    Scores of 4 and 5 push a fact out by a growing interval; \
    0 to 3 bring it back later in the same session.")]
struct Cli {
    /// Custom data directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage decks
    Deck {
        #[command(subcommand)]
        action: DeckCommand,
    },

    /// Add a fact to a deck
    Add {
        /// Deck id
        #[arg(long)]
        deck: i64,
        /// Prompt side
        front: String,
        /// Answer side
        back: String,
    },

    /// Fill a deck with numbered sample facts
    Seed {
        /// Deck id
        #[arg(long)]
        deck: i64,
        /// Number of facts to create
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// List facts due now, in review order
    Due {
        /// Deck id
        #[arg(long)]
        deck: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Review every fact due in a deck
    Review {
        /// Deck id
        #[arg(long)]
        deck: i64,
        /// Unusable scores tolerated per fact before the session stops
        #[arg(long, default_value = "3")]
        max_attempts: usize,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a deck
    Add {
        /// Deck name
        name: String,
    },
    /// List all decks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with review prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    let storage = open_storage(cli.data_dir)?;

    match cli.command {
        Commands::Deck { action } => match action {
            DeckCommand::Add { name } => run_deck_add(&storage, &name),
            DeckCommand::List { json } => run_deck_list(&storage, json),
        },
        Commands::Add { deck, front, back } => run_add(&storage, deck, front, back),
        Commands::Seed { deck, count } => run_seed(&storage, deck, count),
        Commands::Due { deck, json } => run_due(&storage, deck, json),
        Commands::Review { deck, max_attempts } => run_review(&storage, deck, max_attempts),
    }
}

/// Open the database under `--data-dir`, or at the platform default
fn open_storage(data_dir: Option<PathBuf>) -> anyhow::Result<Storage> {
    let db_path = match data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating data directory {}", dir.display()))?;
            Some(dir.join(DB_FILE_NAME))
        }
        None => None,
    };

    tracing::debug!("Opening storage at {:?}", db_path);
    Storage::new(db_path).context("opening flashcard database")
}

fn require_deck(storage: &Storage, deck_id: i64) -> anyhow::Result<Deck> {
    match storage.get_deck(deck_id)? {
        Some(deck) => Ok(deck),
        None => bail!("deck {} does not exist (see `pankito deck list`)", deck_id),
    }
}

/// Run deck add command
fn run_deck_add(storage: &Storage, name: &str) -> anyhow::Result<()> {
    let deck = storage.create_deck(name)?;
    println!("{} {}", "Created deck".green().bold(), deck);
    Ok(())
}

/// Run deck list command
fn run_deck_list(storage: &Storage, json: bool) -> anyhow::Result<()> {
    let decks = storage.list_decks()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decks)?);
        return Ok(());
    }

    println!("{}", "=== Decks ===".cyan().bold());
    if decks.is_empty() {
        println!("{}", "No decks yet. Create one with `pankito deck add <NAME>`.".dimmed());
        return Ok(());
    }

    for deck in &decks {
        let total = storage.list_facts(deck.id)?.len();
        let due = storage.get_due_facts(deck.id, Utc::now())?.len();
        println!(
            "  {:>4}  {}  {}",
            deck.id.to_string().white().bold(),
            deck.name,
            format!("({} facts, {} due)", total, due).dimmed()
        );
    }
    Ok(())
}

/// Run add command
fn run_add(storage: &Storage, deck_id: i64, front: String, back: String) -> anyhow::Result<()> {
    let deck = require_deck(storage, deck_id)?;
    let fact = storage.add_fact(NewFact::new(deck.id, front, back))?;
    println!(
        "{} #{} to {}",
        "Added fact".green().bold(),
        fact.id,
        deck.name
    );
    Ok(())
}

/// Run seed command
fn run_seed(storage: &Storage, deck_id: i64, count: usize) -> anyhow::Result<()> {
    let deck = require_deck(storage, deck_id)?;

    for i in 0..count {
        storage.add_fact(NewFact::new(
            deck.id,
            format!("Test {}?", i),
            format!("Answer {}", i),
        ))?;
    }

    println!(
        "{} {} sample facts to {}",
        "Added".green().bold(),
        count,
        deck.name
    );
    Ok(())
}

/// Run due command
fn run_due(storage: &Storage, deck_id: i64, json: bool) -> anyhow::Result<()> {
    let deck = require_deck(storage, deck_id)?;
    let due = ReviewQueue::load_due(storage, deck.id, Utc::now())?.into_facts();

    if json {
        println!("{}", serde_json::to_string_pretty(&due)?);
        return Ok(());
    }

    println!("{}", format!("=== Due in {} ===", deck.name).cyan().bold());
    if due.is_empty() {
        println!("{}", "Nothing due.".dimmed());
        return Ok(());
    }

    for fact in &due {
        print_fact_row(fact);
    }
    println!();
    println!("{}: {}", "Total due".white().bold(), due.len());
    Ok(())
}

fn print_fact_row(fact: &Fact) {
    println!(
        "  {:>5}  {}  {}  {}",
        format!("#{}", fact.id).white().bold(),
        fact.next_review.format("%Y-%m-%d"),
        format!(
            "[rep={}, ef={:.2}, ivl={}d]",
            fact.repetition, fact.ease_factor, fact.interval
        )
        .dimmed(),
        truncate(&fact.front, 50)
    );
}

/// Run review command
fn run_review(storage: &Storage, deck_id: i64, max_attempts: usize) -> anyhow::Result<()> {
    let deck = require_deck(storage, deck_id)?;
    let queue = ReviewQueue::load_due(storage, deck.id, Utc::now())?;

    if queue.is_empty() {
        println!("{}", format!("Nothing due in {}.", deck.name).green());
        return Ok(());
    }

    println!(
        "{}",
        format!("=== Reviewing {} ({} due) ===", deck.name, queue.len())
            .cyan()
            .bold()
    );

    let mut session = ReviewSession::new(queue, TerminalPresenter::stdio(), storage)
        .with_config(SessionConfig {
            max_quality_attempts: max_attempts,
        });
    let summary = match session.run() {
        Ok(summary) => summary,
        Err(e) => {
            let partial = session.summary();
            println!();
            println!(
                "{}",
                format!(
                    "Stopped early: {} presented, {} passed. Unreviewed facts stay due.",
                    partial.presented, partial.passed
                )
                .yellow()
            );
            return Err(e).with_context(|| format!("review of {} stopped early", deck.name));
        }
    };

    println!();
    println!("{}: {}", "Presented".white().bold(), summary.presented);
    println!("{}: {}", "Passed".white().bold(), summary.passed);
    println!("{}: {}", "Retried".white().bold(), summary.failed);
    if summary.save_failures > 0 {
        println!(
            "{}",
            format!(
                "{} reviews could not be saved; they will be due again next time.",
                summary.save_failures
            )
            .red()
            .bold()
        );
    }
    Ok(())
}

/// Shorten to `max_chars` characters, marking the cut with an ellipsis
fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
