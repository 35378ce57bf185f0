use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const FIRST_ROUND: u8 = 1;
pub const LAST_ROUND: u8 = 20;

pub fn rounds() -> RangeInclusive<u8> {
    FIRST_ROUND..=LAST_ROUND
}

/// One of the three attempts recorded per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "time1")]
    Time1,
    #[serde(rename = "time2")]
    Time2,
    #[serde(rename = "time3")]
    Time3,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Time1, Slot::Time2, Slot::Time3];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Time1 => "time1",
            Slot::Time2 => "time2",
            Slot::Time3 => "time3",
        }
    }

    /// Column label used in the CSV report headers.
    pub fn column_label(self) -> &'static str {
        match self {
            Slot::Time1 => "Time1",
            Slot::Time2 => "Time2",
            Slot::Time3 => "Time3",
        }
    }

    pub fn parse(s: &str) -> Option<Slot> {
        match s {
            "time1" | "1" => Some(Slot::Time1),
            "time2" | "2" => Some(Slot::Time2),
            "time3" | "3" => Some(Slot::Time3),
            _ => None,
        }
    }
}

/// A single recorded attempt: the text as typed, the committed total and the
/// edit-lock flag. `total` is present iff the input parsed at commit time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default)]
    pub editable: bool,
}

pub type SlotCells = BTreeMap<Slot, Cell>;
pub type RoundCells = BTreeMap<u8, SlotCells>;

/// The full recorded data set: shooter name -> round -> slot -> cell.
///
/// Updates are functional: every mutation rebuilds and returns a new sheet,
/// so rankings always read one consistent snapshot. The maps stay tiny
/// (shooters x 20 rounds x 3 slots), which keeps the cloning free in practice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSheet {
    cells: BTreeMap<String, RoundCells>,
}

impl TimeSheet {
    pub fn cell(&self, shooter: &str, round: u8, slot: Slot) -> Option<&Cell> {
        self.cells.get(shooter)?.get(&round)?.get(&slot)
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn has_shooter(&self, shooter: &str) -> bool {
        self.cells.contains_key(shooter)
    }

    pub fn with_cell(&self, shooter: &str, round: u8, slot: Slot, cell: Cell) -> Self {
        let mut next = self.clone();
        next.cells
            .entry(shooter.to_string())
            .or_default()
            .entry(round)
            .or_default()
            .insert(slot, cell);
        next
    }

    /// Sets the edit-lock flag, creating an empty cell when none exists yet.
    pub fn with_editable(&self, shooter: &str, round: u8, slot: Slot, editable: bool) -> Self {
        let mut next = self.clone();
        next.cells
            .entry(shooter.to_string())
            .or_default()
            .entry(round)
            .or_default()
            .entry(slot)
            .or_default()
            .editable = editable;
        next
    }

    pub fn remove_shooter(&self, shooter: &str) -> Self {
        let mut next = self.clone();
        next.cells.remove(shooter);
        next
    }

    /// Moves a shooter's cells to a new name, dropping the old key entirely.
    /// Renaming onto an existing name overwrites that shooter's data.
    pub fn rename_shooter(&self, old: &str, new: &str) -> Self {
        let mut next = self.clone();
        if let Some(rounds) = next.cells.remove(old) {
            next.cells.insert(new.to_string(), rounds);
        }
        next
    }

    /// Defined, non-NaN totals for one round, in slot order (0-3 values).
    pub fn round_totals(&self, shooter: &str, round: u8) -> Vec<f64> {
        Slot::ALL
            .iter()
            .filter_map(|&slot| self.cell(shooter, round, slot)?.total)
            .filter(|t| !t.is_nan())
            .collect()
    }

    /// All defined, non-NaN totals for a shooter across every round and slot.
    pub fn all_totals(&self, shooter: &str) -> Vec<f64> {
        rounds()
            .flat_map(|round| self.round_totals(shooter, round))
            .collect()
    }
}
