use std::sync::LazyLock;

use regex::Regex;

// Digits with an optional fraction, or a bare fraction. A lone "." or the
// empty string is not a term.
static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)$").unwrap());

pub fn is_valid_term(s: &str) -> bool {
    TERM_RE.is_match(s)
}

/// Computes the committed total for a cell's input text.
///
/// A `+`-joined input sums its terms left to right; a plain input parses as
/// one term. Empty interior/trailing segments (a dangling `+` the normalizer
/// leaves in place mid-edit) are skipped. Returns `None` when the input is
/// empty, starts with `+`, or any term fails the grammar; the cell then has
/// no total and the user's text is left in place for correction.
pub fn cell_total(input: &str) -> Option<f64> {
    if input.is_empty() || input.starts_with('+') {
        return None;
    }
    if input.contains('+') {
        let mut total = 0.0;
        for term in input.split('+').filter(|t| !t.is_empty()) {
            if !is_valid_term(term) {
                return None;
            }
            total += term.parse::<f64>().ok()?;
        }
        Some(total)
    } else if is_valid_term(input) {
        input.parse().ok()
    } else {
        None
    }
}
