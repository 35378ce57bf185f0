/// Shapes raw time-entry text into its canonical form: only digits, `.` and
/// `+` survive; runs of `.` or `+` collapse to one; a leading `+` is dropped.
/// A single trailing `.` is kept so an in-progress value like `"12."` is not
/// eaten while the user is still typing the fraction, but a `".."` at the end
/// of the filtered text loses its dot entirely.
///
/// Character-level shaping only; whether the result is a valid time is
/// decided at commit time by [`crate::engine::scoring::cell_total`].
/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '+')
        .collect();

    let mut out = String::with_capacity(filtered.len());
    let mut prev = None;
    for ch in filtered.chars() {
        if (ch == '.' || ch == '+') && prev == Some(ch) {
            continue;
        }
        out.push(ch);
        prev = Some(ch);
    }

    if out.starts_with('+') {
        out.remove(0);
    }
    if out.ends_with('.') {
        out.pop();
    }
    if filtered.ends_with('.') && !filtered.ends_with("..") {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_foreign_characters() {
        assert_eq!(normalize("1a2b.5s"), "12.5");
        assert_eq!(normalize("  12,5 sec "), "125");
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn test_collapses_runs() {
        assert_eq!(normalize("12..5"), "12.5");
        assert_eq!(normalize("1++2"), "1+2");
        assert_eq!(normalize("1...2+++3"), "1.2+3");
    }

    #[test]
    fn test_strips_leading_plus() {
        assert_eq!(normalize("+5"), "5");
        assert_eq!(normalize("++5"), "5");
        assert_eq!(normalize("+"), "");
    }

    #[test]
    fn test_keeps_single_trailing_dot_while_composing() {
        assert_eq!(normalize("12."), "12.");
        assert_eq!(normalize("12.."), "12");
        assert_eq!(normalize("."), ".");
        assert_eq!(normalize(".."), "");
    }

    #[test]
    fn test_interior_and_trailing_plus_survive() {
        // Only a leading `+` is removed; commit handles the empty tail term.
        assert_eq!(normalize("12.3+"), "12.3+");
        assert_eq!(normalize("2.1+1.9"), "2.1+1.9");
    }

    #[test]
    fn test_output_shape_and_idempotence_over_short_inputs() {
        // Exhaustive sweep of short strings over a probing alphabet.
        let alphabet = ['1', '0', '.', '+', 'x'];
        let mut all = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..4 {
            let mut next = Vec::new();
            for s in &frontier {
                for ch in alphabet {
                    let mut t = s.clone();
                    t.push(ch);
                    next.push(t);
                }
            }
            all.extend(next.iter().cloned());
            frontier = next;
        }

        for raw in &all {
            let once = normalize(raw);
            assert!(
                once.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '+'),
                "unexpected char in {once:?} (from {raw:?})"
            );
            assert!(!once.starts_with('+'), "leading + in {once:?} (from {raw:?})");
            assert!(!once.contains(".."), "double dot in {once:?} (from {raw:?})");
            assert!(!once.contains("++"), "double plus in {once:?} (from {raw:?})");
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
