use crate::sheet::{TimeSheet, rounds};

/// One row of a ranking table. `display_time` is the two-decimal rendering
/// used by the report and the CLI tables.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingEntry {
    pub username: String,
    pub time: f64,
    pub display_time: String,
}

impl RankingEntry {
    fn new(username: &str, time: f64) -> Self {
        Self {
            username: username.to_string(),
            time,
            display_time: format!("{time:.2}"),
        }
    }
}

/// Steel score: per round, the times are sorted and the single worst one is
/// dropped (unless the round has only one), the rest averaged. The metric is
/// the sum of those per-round averages; there is no further division by the
/// number of rounds.
pub fn steel_ranking(shooters: &[String], sheet: &TimeSheet) -> Vec<RankingEntry> {
    rank_by(shooters, |name| {
        let mut total = 0.0;
        for round in rounds() {
            let mut times = sheet.round_totals(name, round);
            if times.is_empty() {
                continue;
            }
            times.sort_by(f64::total_cmp);
            if times.len() > 1 {
                times.pop();
            }
            total += times.iter().sum::<f64>() / times.len() as f64;
        }
        total
    })
}

/// Arithmetic mean over every recorded time.
pub fn average_ranking(shooters: &[String], sheet: &TimeSheet) -> Vec<RankingEntry> {
    rank_by(shooters, |name| {
        let times = sheet.all_totals(name);
        if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        }
    })
}

/// Fastest single recorded time.
pub fn best_time_ranking(shooters: &[String], sheet: &TimeSheet) -> Vec<RankingEntry> {
    rank_by(shooters, |name| {
        sheet
            .all_totals(name)
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    })
}

/// Applies a metric to every shooter, drops those whose metric is not a
/// positive finite number (no recorded times, or a metric of exactly zero),
/// and sorts ascending. The sort is stable, so ties keep roster order.
fn rank_by<F>(shooters: &[String], metric: F) -> Vec<RankingEntry>
where
    F: Fn(&str) -> f64,
{
    let mut entries: Vec<RankingEntry> = shooters
        .iter()
        .map(|name| (name, metric(name)))
        .filter(|(_, time)| time.is_finite() && *time > 0.0)
        .map(|(name, time)| RankingEntry::new(name, time))
        .collect();
    entries.sort_by(|a, b| a.time.total_cmp(&b.time));
    entries
}
