use log::{info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::engine::normalize::normalize;
use crate::engine::ranking::{
    RankingEntry, average_ranking, best_time_ranking, steel_ranking,
};
use crate::engine::scoring::cell_total;
use crate::report::{self, ReportError};
use crate::sheet::{Cell, FIRST_ROUND, LAST_ROUND, Slot, TimeSheet};
use crate::store::JsonStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("no shooter named {0:?}")]
    UnknownShooter(String),
    #[error("shooter name cannot be empty")]
    EmptyName,
    #[error("round must be between {FIRST_ROUND} and {LAST_ROUND}, got {0}")]
    RoundOutOfRange(u8),
    #[error("{shooter}'s {} in round {round} is locked; unlock it first", .slot.as_str())]
    CellLocked { shooter: String, round: u8, slot: Slot },
    #[error("incorrect passphrase")]
    IncorrectPassphrase,
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// What a commit produced: the canonical input text that was stored and the
/// total it parsed to, if any.
#[derive(Debug, PartialEq)]
pub struct CommitOutcome {
    pub input: String,
    pub total: Option<f64>,
}

/// The interactive session: roster, time sheet and current round, hydrated
/// from the store at construction and mirrored back after every mutation.
/// All scoring reads are pure re-derivations from the current snapshot.
pub struct App {
    pub config: Config,
    store: Option<JsonStore>,
    shooters: Vec<String>,
    sheet: TimeSheet,
    current_round: u8,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = match &config.data_dir {
            Some(dir) => JsonStore::with_base_dir(dir.clone())?,
            None => JsonStore::new()?,
        };
        let shooters = store.load_shooters();
        let sheet = store.load_times();
        let current_round = store.load_round();
        info!(
            "hydrated session: {} shooters, round {current_round}",
            shooters.len()
        );
        Ok(Self {
            config,
            store: Some(store),
            shooters,
            sheet,
            current_round,
        })
    }

    /// A session without persistence, for tests.
    #[allow(dead_code)]
    pub fn detached(config: Config) -> Self {
        Self {
            config,
            store: None,
            shooters: Vec::new(),
            sheet: TimeSheet::default(),
            current_round: FIRST_ROUND,
        }
    }

    pub fn shooters(&self) -> &[String] {
        &self.shooters
    }

    pub fn sheet(&self) -> &TimeSheet {
        &self.sheet
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn cell(&self, shooter: &str, round: u8, slot: Slot) -> Option<&Cell> {
        self.sheet.cell(shooter, round, slot)
    }

    pub fn add_shooter(&mut self, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyName);
        }
        self.shooters.push(name.to_string());
        self.persist_shooters();
        Ok(())
    }

    /// Renames in place, carrying the recorded times to the new name. Every
    /// roster entry with the old name is relabeled; renaming onto an existing
    /// name silently takes over that shooter's data.
    pub fn rename_shooter(&mut self, old: &str, new: &str) -> Result<(), AppError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(AppError::EmptyName);
        }
        if !self.shooters.iter().any(|n| n == old) {
            return Err(AppError::UnknownShooter(old.to_string()));
        }
        if new == old {
            return Ok(());
        }
        for entry in &mut self.shooters {
            if entry == old {
                *entry = new.to_string();
            }
        }
        self.sheet = self.sheet.rename_shooter(old, new);
        self.persist_shooters();
        self.persist_times();
        Ok(())
    }

    pub fn delete_shooter(&mut self, name: &str) -> Result<(), AppError> {
        if !self.shooters.iter().any(|n| n == name) {
            return Err(AppError::UnknownShooter(name.to_string()));
        }
        self.shooters.retain(|n| n != name);
        self.sheet = self.sheet.remove_shooter(name);
        self.persist_shooters();
        self.persist_times();
        Ok(())
    }

    pub fn set_round(&mut self, round: u8) -> Result<(), AppError> {
        if !(FIRST_ROUND..=LAST_ROUND).contains(&round) {
            return Err(AppError::RoundOutOfRange(round));
        }
        self.current_round = round;
        self.persist_round();
        Ok(())
    }

    /// Normalizes and commits one time entry. The committed cell is locked
    /// (`editable = false`) whether or not the text parsed to a total; a
    /// previously committed cell must be unlocked first.
    pub fn record_time(
        &mut self,
        shooter: &str,
        round: Option<u8>,
        slot: Slot,
        raw: &str,
    ) -> Result<CommitOutcome, AppError> {
        let round = self.resolve_round(round)?;
        if !self.shooters.iter().any(|n| n == shooter) {
            return Err(AppError::UnknownShooter(shooter.to_string()));
        }
        if let Some(cell) = self.sheet.cell(shooter, round, slot)
            && !cell.input.is_empty()
            && !cell.editable
        {
            return Err(AppError::CellLocked {
                shooter: shooter.to_string(),
                round,
                slot,
            });
        }

        let input = normalize(raw);
        let total = cell_total(&input);
        if total.is_none() && !input.is_empty() {
            warn!("{shooter} round {round} {}: {input:?} has no valid total", slot.as_str());
        }
        self.sheet = self.sheet.with_cell(
            shooter,
            round,
            slot,
            Cell {
                input: input.clone(),
                total,
                editable: false,
            },
        );
        self.persist_times();
        Ok(CommitOutcome { input, total })
    }

    /// Re-opens a committed cell for editing. The configured passphrase is
    /// checked by exact string equality; on mismatch the cell stays locked.
    pub fn unlock_cell(
        &mut self,
        shooter: &str,
        round: Option<u8>,
        slot: Slot,
        passphrase: &str,
    ) -> Result<(), AppError> {
        let round = self.resolve_round(round)?;
        if !self.shooters.iter().any(|n| n == shooter) {
            return Err(AppError::UnknownShooter(shooter.to_string()));
        }
        if passphrase != self.config.passphrase {
            return Err(AppError::IncorrectPassphrase);
        }
        self.sheet = self.sheet.with_editable(shooter, round, slot, true);
        self.persist_times();
        Ok(())
    }

    pub fn steel_ranking(&self) -> Vec<RankingEntry> {
        steel_ranking(&self.shooters, &self.sheet)
    }

    pub fn average_ranking(&self) -> Vec<RankingEntry> {
        average_ranking(&self.shooters, &self.sheet)
    }

    pub fn best_time_ranking(&self) -> Vec<RankingEntry> {
        best_time_ranking(&self.shooters, &self.sheet)
    }

    pub fn export_csv(&self) -> String {
        report::render_csv(&self.shooters, &self.sheet)
    }

    /// Replaces the roster and sheet with the contents of an exported report.
    /// On any parse error the in-memory data set is left untouched.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, AppError> {
        let imported = report::parse_csv(text)?;
        let count = imported.shooters.len();
        self.shooters = imported.shooters;
        self.sheet = imported.sheet;
        self.persist_shooters();
        self.persist_times();
        info!("imported {count} shooters");
        Ok(count)
    }

    fn resolve_round(&self, round: Option<u8>) -> Result<u8, AppError> {
        let round = round.unwrap_or(self.current_round);
        if (FIRST_ROUND..=LAST_ROUND).contains(&round) {
            Ok(round)
        } else {
            Err(AppError::RoundOutOfRange(round))
        }
    }

    // Persistence is a mirror of the in-memory state; a failed write is
    // logged but never blocks the session.
    fn persist_shooters(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_shooters(&self.shooters)
        {
            warn!("could not persist roster: {e}");
        }
    }

    fn persist_times(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_times(&self.sheet)
        {
            warn!("could not persist time sheet: {e}");
        }
    }

    fn persist_round(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_round(self.current_round)
        {
            warn!("could not persist current round: {e}");
        }
    }
}
