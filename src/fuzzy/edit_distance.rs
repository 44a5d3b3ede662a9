//! Edit distance with prefix/suffix trimming.
//!
//! Equal leading and trailing characters never change the distance, so they
//! are stripped before the O(nm) table is built. After trimming, inputs of
//! length zero or one are answered without a table at all.

use crate::trie::common_prefix_len;

/// Levenshtein distance between two char slices
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let head = common_prefix_len(a, b);
    let (a, b) = (&a[head..], &b[head..]);
    let tail = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - tail], &b[..b.len() - tail]);

    // Keep the shorter string as the row
    let (a, b) = if a.len() < b.len() { (b, a) } else { (a, b) };

    match b.len() {
        0 => return a.len(),
        // After trimming `a` and `b` differ, so one char costs a
        // substitution unless it appears somewhere in `a`
        1 => return if a.contains(&b[0]) { a.len() - 1 } else { a.len() },
        _ => {}
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ac) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[b.len()]
}

/// Levenshtein distance between two strings, counted in chars
pub fn levenshtein_str(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein(&a, &b)
}

/// The distance between `a` and `b` if it is at most `max`
///
/// The length difference is a lower bound on the distance, so pairs that
/// differ in length by more than `max` are rejected without building a table.
pub fn levenshtein_within(a: &[char], b: &[char], max: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    let d = levenshtein(a, b);
    (d <= max).then_some(d)
}
