mod app;
mod config;
mod engine;
mod report;
mod sheet;
mod store;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use app::App;
use config::Config;
use engine::RankingEntry;
use sheet::Slot;

#[derive(Parser)]
#[command(
    name = "steeltally",
    version,
    about = "Data entry and scoring for steel-shooting time trials"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new shooter
    Add { name: String },
    /// Rename a shooter, carrying their recorded times to the new name
    Rename { old: String, new: String },
    /// Delete a shooter and all their recorded times
    Remove { name: String },
    /// Show or set the current round (1-20)
    Round { round: Option<u8> },
    /// Record a time; the value may be a sum of segments like "2.1+1.9+3"
    Time {
        shooter: String,
        #[arg(value_parser = parse_slot)]
        slot: Slot,
        value: String,
        /// Round to record into (defaults to the current round)
        #[arg(short, long)]
        round: Option<u8>,
    },
    /// Unlock a committed time for re-entry
    Unlock {
        shooter: String,
        #[arg(value_parser = parse_slot)]
        slot: Slot,
        #[arg(short, long)]
        passphrase: String,
        #[arg(short, long)]
        round: Option<u8>,
    },
    /// Print the time table for a round
    Show {
        #[arg(short, long)]
        round: Option<u8>,
    },
    /// Print the three ranking tables
    Rankings,
    /// Write the results report as CSV
    Export { path: Option<PathBuf> },
    /// Load shooters and times from a previously exported CSV
    Import { path: PathBuf },
}

fn parse_slot(s: &str) -> Result<Slot, String> {
    Slot::parse(s).ok_or_else(|| format!("expected time1, time2 or time3, got {s:?}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_default();
    let mut app = App::new(config)?;

    match cli.command {
        Command::Add { name } => {
            app.add_shooter(&name)?;
            println!("added shooter {}", name.trim());
        }
        Command::Rename { old, new } => {
            app.rename_shooter(&old, &new)?;
            println!("renamed {old} to {}", new.trim());
        }
        Command::Remove { name } => {
            app.delete_shooter(&name)?;
            println!("removed {name} and all recorded times");
        }
        Command::Round { round: None } => {
            println!("round {} of 20", app.current_round());
        }
        Command::Round { round: Some(n) } => {
            app.set_round(n)?;
            println!("round {n} of 20");
        }
        Command::Time {
            shooter,
            slot,
            value,
            round,
        } => {
            let outcome = app.record_time(&shooter, round, slot, &value)?;
            match outcome.total {
                Some(total) => println!("{shooter} {}: {} = {total}", slot.as_str(), outcome.input),
                None => println!(
                    "{shooter} {}: kept {:?}, not a valid time yet",
                    slot.as_str(),
                    outcome.input
                ),
            }
        }
        Command::Unlock {
            shooter,
            slot,
            passphrase,
            round,
        } => {
            app.unlock_cell(&shooter, round, slot, &passphrase)?;
            println!("{shooter} {} unlocked for editing", slot.as_str());
        }
        Command::Show { round } => {
            let round = round.unwrap_or(app.current_round());
            print_round_table(&app, round);
        }
        Command::Rankings => {
            print_ranking("Steel Shooting Ranking", &app.steel_ranking());
            print_ranking("Average Time Ranking", &app.average_ranking());
            print_ranking("Best Time Ranking", &app.best_time_ranking());
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "shooting-results-{}.csv",
                    chrono::Local::now().format("%Y-%m-%d")
                ))
            });
            fs::write(&path, app.export_csv())
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("exported results to {}", path.display());
        }
        Command::Import { path } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let count = app.import_csv(&text)?;
            println!("imported {count} shooters from {}", path.display());
        }
    }

    Ok(())
}

fn print_round_table(app: &App, round: u8) {
    println!("Round {round} of 20");
    println!("{:<20} {:>12} {:>12} {:>12}", "Shooter", "Time 1", "Time 2", "Time 3");
    for name in app.shooters() {
        let mut row = format!("{name:<20}");
        for slot in Slot::ALL {
            let shown = match app.cell(name, round, slot) {
                Some(cell) => match cell.total {
                    Some(total) => format!("{total:.2}"),
                    None if cell.input.is_empty() => String::new(),
                    None => format!("({})", cell.input),
                },
                None => String::new(),
            };
            row.push_str(&format!(" {shown:>12}"));
        }
        println!("{row}");
    }
}

fn print_ranking(title: &str, entries: &[RankingEntry]) {
    println!("{title}");
    if entries.is_empty() {
        println!("  no times recorded");
    }
    for (idx, entry) in entries.iter().enumerate() {
        println!("  {:>2}. {:<20} {:>8}", idx + 1, entry.username, entry.display_time);
    }
    println!();
}
