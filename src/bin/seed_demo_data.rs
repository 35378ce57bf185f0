//! Seeds a store with demo shooters and committed times, for trying the CLI
//! without typing in a full match by hand.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use steeltally::engine::normalize::normalize;
use steeltally::engine::scoring::cell_total;
use steeltally::sheet::{Cell, Slot, TimeSheet};
use steeltally::store::JsonStore;

#[derive(Parser)]
#[command(about = "Seed a steeltally store with demo shooters and times")]
struct Cli {
    /// Store directory (defaults to the user data dir)
    #[arg(long)]
    dir: Option<PathBuf>,
}

const DEMO_TIMES: &[(&str, u8, Slot, &str)] = &[
    ("Anna", 1, Slot::Time1, "4.21"),
    ("Anna", 1, Slot::Time2, "3.98"),
    ("Anna", 1, Slot::Time3, "5.10"),
    ("Anna", 2, Slot::Time1, "2.1+1.9"),
    ("Bea", 1, Slot::Time1, "4.87"),
    ("Bea", 1, Slot::Time2, "6.02"),
    ("Bea", 2, Slot::Time1, "3.75"),
    ("Bea", 2, Slot::Time2, "3.4+0.5"),
    ("Casper", 1, Slot::Time1, "5.55"),
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.dir {
        Some(dir) => JsonStore::with_base_dir(dir)?,
        None => JsonStore::new()?,
    };

    let shooters: Vec<String> = ["Anna", "Bea", "Casper"]
        .into_iter()
        .map(String::from)
        .collect();

    let mut sheet = TimeSheet::default();
    for &(name, round, slot, raw) in DEMO_TIMES {
        let input = normalize(raw);
        let total = cell_total(&input);
        sheet = sheet.with_cell(
            name,
            round,
            slot,
            Cell {
                input,
                total,
                editable: false,
            },
        );
    }

    store.save_shooters(&shooters)?;
    store.save_times(&sheet)?;
    store.save_round(1)?;

    println!(
        "seeded {} shooters and {} demo times",
        shooters.len(),
        DEMO_TIMES.len()
    );
    Ok(())
}
