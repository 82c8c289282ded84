//! Mnemos CLI
//!
//! Seeds an associative memory from a scenario file and runs one query or
//! consolidation cycle against it.

mod scenario;

use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mnemos_core::{ActivatedMemory, Association, AssociativeMemory, ContextValue, MemoryEntry};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

/// Mnemos - Associative Memory CLI
#[derive(Parser)]
#[command(name = "mnemos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the Mnemos associative memory engine")]
#[command(long_about = "Mnemos is an associative memory engine.\n\nMemories and their associations strengthen with recall, decay with time, and are forgotten when weak enough. Every command seeds a fresh store from a JSON scenario file.")]
struct Cli {
    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show memory statistics
    Stats {
        /// Scenario file
        scenario: PathBuf,
    },

    /// Recall a memory by exact content
    Recall {
        scenario: PathBuf,
        content: String,
    },

    /// List associations touching a memory, strongest first
    Associations {
        scenario: PathBuf,
        content: String,
        /// Minimum association strength
        #[arg(long, default_value = "0.3")]
        min_strength: f64,
    },

    /// Find memories by tag
    Tags {
        scenario: PathBuf,
        /// Tag to match (repeatable)
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,
        /// Require every tag instead of any
        #[arg(long)]
        all: bool,
    },

    /// Find memories by context key/value
    Context {
        scenario: PathBuf,
        key: String,
        value: String,
    },

    /// Spread activation outward from a memory
    Activate {
        scenario: PathBuf,
        content: String,
        /// Number of propagation rounds
        #[arg(long, default_value = "2")]
        depth: usize,
    },

    /// Run a consolidation cycle
    Consolidate {
        scenario: PathBuf,
        /// Pretend this many days have passed since seeding
        #[arg(long, default_value = "0")]
        after_days: i64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Stats { scenario } => run_stats(&load(scenario)?, json),
        Commands::Recall { scenario, content } => run_recall(load(scenario)?, &content, json),
        Commands::Associations {
            scenario,
            content,
            min_strength,
        } => run_associations(&load(scenario)?, &content, min_strength, json),
        Commands::Tags {
            scenario,
            tags,
            all,
        } => run_tags(&load(scenario)?, &tags, all, json),
        Commands::Context {
            scenario,
            key,
            value,
        } => run_context(&load(scenario)?, &key, &value, json),
        Commands::Activate {
            scenario,
            content,
            depth,
        } => run_activate(&load(scenario)?, &content, depth, json),
        Commands::Consolidate {
            scenario,
            after_days,
        } => run_consolidate(load(scenario)?, after_days, json),
    }
}

fn load(path: PathBuf) -> anyhow::Result<AssociativeMemory> {
    Scenario::load(&path)?.seed()
}

/// Run stats command
fn run_stats(memory: &AssociativeMemory, json: bool) -> anyhow::Result<()> {
    let stats = memory.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "=== Mnemos Memory Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Total Memories".white().bold(), stats.total_memories);
    println!("{}: {}", "Total Associations".white().bold(), stats.total_associations);
    println!("{}: {}", "Recalled Memories".white().bold(), stats.accessed_memories);
    println!("{}: {}", "Distinct Tags".white().bold(), stats.distinct_tags);
    println!("{}: {:.1}%", "Average Strength".white().bold(), stats.average_strength * 100.0);
    println!(
        "{}: {:.1}%",
        "Average Association Strength".white().bold(),
        stats.average_association_strength * 100.0
    );
    if let Some(oldest) = stats.oldest_memory {
        println!("{}: {}", "Oldest Memory".white().bold(), oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = stats.newest_memory {
        println!("{}: {}", "Newest Memory".white().bold(), newest.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

/// Run recall command
fn run_recall(mut memory: AssociativeMemory, content: &str, json: bool) -> anyhow::Result<()> {
    match memory.recall(content, true) {
        Some(entry) if json => println!("{}", serde_json::to_string_pretty(entry)?),
        Some(entry) => print_entry(entry),
        None if json => println!("null"),
        None => println!("{}", format!("No memory of {:?}.", content).dimmed()),
    }
    Ok(())
}

/// Run associations command
fn run_associations(
    memory: &AssociativeMemory,
    content: &str,
    min_strength: f64,
    json: bool,
) -> anyhow::Result<()> {
    let found = memory.find_associations(content, min_strength);

    if json {
        let rows: Vec<_> = found
            .iter()
            .map(|assoc| association_json(memory, assoc))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format!("=== Associations of {:?} ===", content).cyan().bold());
    if found.is_empty() {
        println!("{}", "No associations found.".dimmed());
    }
    for assoc in found {
        let source = endpoint(memory, assoc, true);
        let target = endpoint(memory, assoc, false);
        println!(
            "  {} {} {} {} {}",
            strength_bar(assoc.strength),
            source.white().bold(),
            "->".dimmed(),
            target.white().bold(),
            format!("({})", assoc.kind).dimmed()
        );
    }
    Ok(())
}

/// Run tags command
fn run_tags(memory: &AssociativeMemory, tags: &[String], all: bool, json: bool) -> anyhow::Result<()> {
    let found = memory.find_by_tags(tags, all);
    print_entries(&format!("Tagged {}", tags.join(if all { " & " } else { " | " })), &found, json)
}

/// Run context command
fn run_context(memory: &AssociativeMemory, key: &str, value: &str, json: bool) -> anyhow::Result<()> {
    let found = memory.find_by_context(key, parse_context_value(value));
    print_entries(&format!("Context {}={}", key, value), &found, json)
}

/// Run activate command
fn run_activate(
    memory: &AssociativeMemory,
    content: &str,
    depth: usize,
    json: bool,
) -> anyhow::Result<()> {
    let activated = memory.spread_activation(content, depth);

    if json {
        println!("{}", serde_json::to_string_pretty(&activated)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("=== Activation from {:?} (depth {}) ===", content, depth).cyan().bold()
    );
    if activated.is_empty() {
        println!("{}", format!("No memory of {:?}.", content).dimmed());
    }
    for ActivatedMemory {
        entry,
        activation,
        depth,
    } in activated
    {
        println!(
            "  {} {:.3} {} {}",
            strength_bar(activation),
            activation,
            entry.content.white().bold(),
            format!("(hop {})", depth).dimmed()
        );
    }
    Ok(())
}

/// Run consolidate command
fn run_consolidate(mut memory: AssociativeMemory, after_days: i64, json: bool) -> anyhow::Result<()> {
    let now = TimeDelta::try_days(after_days)
        .and_then(|shift| Utc::now().checked_add_signed(shift))
        .with_context(|| format!("--after-days {} is out of range", after_days))?;
    let report = memory.consolidate_at(now);

    if json {
        let survivors: Vec<&str> = memory.entries().map(|e| e.content.as_str()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "report": report,
                "survivors": survivors,
            }))?
        );
        return Ok(());
    }

    println!("{}", "=== Consolidation ===".cyan().bold());
    println!("{}: {}", "Decayed".white().bold(), report.entries_decayed);
    println!("{}: {}", "Forgotten".white().bold(), report.entries_forgotten.to_string().red());
    println!(
        "{}: {} strengthened, {} weakened, {} pruned, {} cascaded",
        "Associations".white().bold(),
        report.associations_strengthened.to_string().green(),
        report.associations_weakened.to_string().yellow(),
        report.associations_pruned.to_string().red(),
        report.associations_cascaded
    );
    println!("{}: {}ms", "Duration".white().bold(), report.duration_ms);
    println!();

    let survivors: Vec<&MemoryEntry<String>> = memory.entries().collect();
    print_entries("Surviving memories", &survivors, false)
}

/// Interpret a command-line value the way JSON scenario values are read
fn parse_context_value(raw: &str) -> ContextValue {
    if let Ok(flag) = raw.parse::<bool>() {
        ContextValue::Flag(flag)
    } else if let Ok(number) = raw.parse::<i64>() {
        ContextValue::Integer(number)
    } else {
        ContextValue::from(raw)
    }
}

fn print_entries(title: &str, entries: &[&MemoryEntry<String>], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!("{}", format!("=== {} ===", title).cyan().bold());
    if entries.is_empty() {
        println!("{}", "No memories found.".dimmed());
    }
    for entry in entries {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &MemoryEntry<String>) {
    let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
    println!(
        "  {} {} {}",
        strength_bar(entry.strength),
        entry.content.white().bold(),
        format!("[{}] recalled {}x", tags.join(", "), entry.access_count).dimmed()
    );
}

fn endpoint(memory: &AssociativeMemory, assoc: &Association, source: bool) -> String {
    let key = if source { assoc.source_id } else { assoc.target_id };
    memory
        .entry(key)
        .map(|e| e.content.clone())
        .unwrap_or_else(|| key.to_string())
}

fn association_json(memory: &AssociativeMemory, assoc: &Association) -> serde_json::Value {
    json!({
        "source": endpoint(memory, assoc, true),
        "target": endpoint(memory, assoc, false),
        "kind": assoc.kind,
        "strength": assoc.strength,
        "context": assoc.context,
    })
}

/// Ten-cell bar, colored by band
fn strength_bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * 10.0).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
    if value >= 0.7 {
        bar.green().to_string()
    } else if value >= 0.4 {
        bar.yellow().to_string()
    } else {
        bar.red().to_string()
    }
}
