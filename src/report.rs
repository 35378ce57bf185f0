use std::fmt::Write as _;

use log::{debug, warn};
use thiserror::Error;

use crate::engine::ranking::{RankingEntry, average_ranking, best_time_ranking, steel_ranking};
use crate::sheet::{Cell, Slot, TimeSheet, rounds};

const TITLE: &str = "Shooting Results";
const RAW_SECTION: &str = "Raw Time Data";
const VALUES_PER_ROW: usize = 60; // 20 rounds x 3 slots

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("not a results file: no \"Raw Time Data\" section found")]
    MissingRawSection,
    #[error("malformed raw-data header row")]
    MalformedHeader,
    #[error("no shooter rows found")]
    NoShooterRows,
}

/// Roster and sheet recovered from an imported report. Every recovered cell
/// is committed (`editable == false`); the file format carries totals only.
#[derive(Debug, Default, PartialEq)]
pub struct ImportedSheet {
    pub shooters: Vec<String>,
    pub sheet: TimeSheet,
}

/// Renders the full results report: the raw time matrix followed by the
/// three ranking tables, sections separated by blank lines.
pub fn render_csv(shooters: &[String], sheet: &TimeSheet) -> String {
    let mut csv = String::new();
    csv.push_str(TITLE);
    csv.push_str("\n\n");

    csv.push_str(RAW_SECTION);
    csv.push('\n');
    csv.push_str("User");
    for round in rounds() {
        for slot in Slot::ALL {
            let _ = write!(csv, ",Round {round} {}", slot.column_label());
        }
    }
    csv.push('\n');

    for name in shooters {
        csv.push_str(name);
        for round in rounds() {
            for slot in Slot::ALL {
                csv.push(',');
                // A zero total exports as an empty field, mirroring the
                // rankings' zero exclusion.
                match sheet.cell(name, round, slot).and_then(|c| c.total) {
                    Some(total) if total != 0.0 => {
                        let _ = write!(csv, "{total}");
                    }
                    _ => {}
                }
            }
        }
        csv.push('\n');
    }

    ranking_section(
        &mut csv,
        "Steel Shooting Ranking",
        "Total Time",
        &steel_ranking(shooters, sheet),
    );
    ranking_section(
        &mut csv,
        "Average Time Ranking",
        "Average Time",
        &average_ranking(shooters, sheet),
    );
    ranking_section(
        &mut csv,
        "Best Time Ranking",
        "Best Time",
        &best_time_ranking(shooters, sheet),
    );
    csv
}

fn ranking_section(csv: &mut String, title: &str, value_header: &str, entries: &[RankingEntry]) {
    csv.push('\n');
    csv.push_str(title);
    csv.push('\n');
    let _ = writeln!(csv, "Rank,Username,{value_header}");
    for (idx, entry) in entries.iter().enumerate() {
        let _ = writeln!(csv, "{},{},{}", idx + 1, entry.username, entry.display_time);
    }
}

/// Parses a previously exported report back into a roster and time sheet.
///
/// Only the raw-data section is read: the line after the `Raw Time Data`
/// marker is the header row, and shooter rows follow until a blank line or a
/// ranking section starts. Empty value fields create no cell; fields that do
/// not parse as a number are skipped with a warning.
pub fn parse_csv(text: &str) -> Result<ImportedSheet, ReportError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let marker = lines
        .iter()
        .position(|l| l.contains(RAW_SECTION))
        .ok_or(ReportError::MissingRawSection)?;

    let header = lines.get(marker + 1).ok_or(ReportError::MalformedHeader)?;
    if header.split(',').count() < 4 {
        return Err(ReportError::MalformedHeader);
    }

    let mut shooters: Vec<String> = Vec::new();
    let mut sheet = TimeSheet::default();
    for line in lines.iter().skip(marker + 2) {
        if line.trim().is_empty() || line.contains("Ranking") {
            break;
        }
        let mut fields = line.split(',');
        let name = fields.next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        shooters.push(name.to_string());

        for (idx, field) in fields.take(VALUES_PER_ROW).enumerate() {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let round = (idx / Slot::ALL.len()) as u8 + 1;
            let slot = Slot::ALL[idx % Slot::ALL.len()];
            match field.parse::<f64>() {
                Ok(total) => {
                    sheet = sheet.with_cell(
                        name,
                        round,
                        slot,
                        Cell {
                            input: field.to_string(),
                            total: Some(total),
                            editable: false,
                        },
                    );
                }
                Err(_) => {
                    warn!("skipping unparseable time {field:?} for {name}, round {round}");
                }
            }
        }
    }

    if shooters.is_empty() {
        return Err(ReportError::NoShooterRows);
    }
    debug!("imported {} shooter rows", shooters.len());
    Ok(ImportedSheet { shooters, sheet })
}
