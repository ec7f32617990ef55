//! UCB1 scoring over a set of sibling moves.

use crate::stats::Entry;

/// UCB1 score of one candidate.
///
/// `total_plays` is the sum of plays over all siblings. A candidate that has
/// never been played scores `+inf` so it is preferred over any visited one.
#[inline]
pub fn ucb1(entry: &Entry, total_plays: u32, exploration: f64) -> f64 {
    let Some(rate) = entry.win_rate() else {
        return f64::INFINITY;
    };
    let log_total = f64::from(total_plays.max(1)).ln();
    rate + exploration * (log_total / f64::from(entry.plays)).sqrt()
}

/// Index of the sibling with the highest UCB1 score; earliest wins on ties.
/// Returns `None` for an empty sibling set.
pub fn preferred(siblings: &[Entry], exploration: f64) -> Option<usize> {
    let total: u32 = siblings.iter().map(|e| e.plays).sum();
    let mut best: Option<(usize, f64)> = None;
    for (i, entry) in siblings.iter().enumerate() {
        let score = ucb1(entry, total, exploration);
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
