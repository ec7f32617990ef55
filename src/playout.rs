//! Monte Carlo rollouts.
//!
//! A rollout plays one game forward from a private copy of the root state,
//! up to the move cap or until the rules engine declares the game over, and
//! then credits the outcome to every fingerprint it passed through.
//!
//! Each rollout expands the tree by at most one fingerprint: the first one it
//! reaches that is not yet in the table. Fingerprints beyond that point are
//! only counted if an earlier rollout already recorded them.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::{Level, trace};

use crate::config::{RolloutPolicy, SearchConfig};
use crate::fingerprint::Fingerprint;
use crate::movegen::legal_moves;
use crate::rules::{Colour, Move, Rules};
use crate::stats::StatsStore;
use crate::ucb;

/// Mutable state shared by all rollouts of one search: the statistics table
/// and the random number generator.
pub struct SearchContext<P: Ord + Hash> {
    pub stats: StatsStore<P>,
    pub rng: fastrand::Rng,
}

impl<P: Ord + Hash> SearchContext<P> {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            stats: StatsStore::new(),
            rng,
        }
    }
}

/// How a rollout ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Option<Colour>,
    pub loser: Option<Colour>,
    /// Plies actually played.
    pub plies: usize,
    /// Whether the rules engine reported the game as over.
    pub finished: bool,
}

/// Run one rollout from `root` and backpropagate its result into `ctx`.
///
/// Returns `None` if the rules engine refused a move mid-rollout; the rollout
/// is then dropped without touching any statistics.
pub fn run_simulation<R: Rules>(
    rules: &R,
    root: &R::State,
    config: &SearchConfig,
    ctx: &mut SearchContext<R::Position>,
) -> Option<Outcome> {
    let mut state = root.clone();
    let mut visited: HashSet<Fingerprint<R::Position>> = HashSet::new();
    let mut expanded = false;
    let mut plies = 0;

    while plies < config.move_cap {
        let mover = rules.turn(&state);
        let moves = legal_moves(rules, &state, mover);
        if moves.is_empty() {
            break; // stuck: nothing more to simulate
        }

        let preferred = match config.rollout_policy {
            RolloutPolicy::Ucb1 => preferred_move(rules, &state, mover, &moves, config.exploration, &ctx.stats),
            RolloutPolicy::Uniform if tracing::enabled!(Level::TRACE) => {
                preferred_move(rules, &state, mover, &moves, config.exploration, &ctx.stats)
            }
            RolloutPolicy::Uniform => None,
        };
        let random = moves[ctx.rng.usize(..moves.len())];
        let mv = match (config.rollout_policy, preferred) {
            (RolloutPolicy::Ucb1, Some(mv)) => mv,
            (_, Some(mv)) => {
                trace!(ply = plies, ?mover, preferred = ?mv, played = ?random, "UCB1 preference");
                random
            }
            (_, None) => random,
        };

        let next = match rules.apply(&state, mv) {
            Ok(next) => next,
            Err(err) => {
                trace!(ply = plies, ?mv, %err, "rollout abandoned");
                return None;
            }
        };
        plies += 1;

        let fp = Fingerprint::after_move(rules, &next, mover, mv);
        if !expanded && !ctx.stats.contains(&fp) {
            ctx.stats.record_new(fp.clone());
            expanded = true;
        }
        if ctx.stats.contains(&fp) {
            visited.insert(fp);
        }

        state = next;
        if rules.is_over(&state) {
            break;
        }
    }

    let outcome = if rules.is_over(&state) {
        Outcome {
            winner: rules.winner(&state),
            loser: rules.loser(&state),
            plies,
            finished: true,
        }
    } else {
        let (winner, loser) = score_extremes(rules, &state);
        Outcome {
            winner,
            loser,
            plies,
            finished: false,
        }
    };

    for fp in &visited {
        ctx.stats.increment_plays(fp);
        if outcome.winner == Some(fp.mover) {
            ctx.stats.adjust_wins(fp, 1);
        }
        if outcome.loser == Some(fp.mover) {
            ctx.stats.adjust_wins(fp, -1);
        }
    }

    Some(outcome)
}

/// The UCB1-preferred move among `moves`, or `None` unless every candidate's
/// fingerprint is already in the table.
///
/// Candidates the rules engine refuses to apply are left out of the sibling set.
pub fn preferred_move<R: Rules>(
    rules: &R,
    state: &R::State,
    mover: Colour,
    moves: &[Move<R::Position>],
    exploration: f64,
    stats: &StatsStore<R::Position>,
) -> Option<Move<R::Position>> {
    let mut siblings = Vec::with_capacity(moves.len());
    let mut entries = Vec::with_capacity(moves.len());

    for &mv in moves {
        let Ok(next) = rules.apply(state, mv) else {
            continue;
        };
        let fp = Fingerprint::after_move(rules, &next, mover, mv);
        let entry = stats.get(&fp)?;
        siblings.push(mv);
        entries.push(*entry);
    }

    ucb::preferred(&entries, exploration).map(|i| siblings[i])
}

/// Winner and loser by score when a rollout stops before the game ends.
///
/// Only a strictly highest (lowest) score names a winner (loser); a shared
/// extreme leaves that side unattributed.
pub fn score_extremes<R: Rules>(rules: &R, state: &R::State) -> (Option<Colour>, Option<Colour>) {
    let scores = Colour::ALL.map(|c| (c, rules.score(state, c)));
    let unique = |target: i32| {
        let mut hits = scores.iter().filter(|(_, s)| *s == target);
        match (hits.next(), hits.next()) {
            (Some((c, _)), None) => Some(*c),
            _ => None,
        }
    };

    let max = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
    let min = scores.iter().map(|(_, s)| *s).min().unwrap_or(0);
    (unique(max), unique(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skirmish::{Kind, Skirmish, SkirmishState, Square};
    use crate::testing::Refusing;

    fn config(move_cap: usize) -> SearchConfig {
        SearchConfig::default().with_move_cap(move_cap).with_seed(7)
    }

    /// Blue king next to Red's king, Green far away.
    fn capture_in_one() -> (Skirmish, SkirmishState) {
        let rules = Skirmish::new(1, 5);
        let state = rules
            .empty_state(Colour::Blue)
            .with_piece(Square::new(0, 0), Kind::King, Colour::Blue)
            .with_piece(Square::new(0, 1), Kind::King, Colour::Red)
            .with_piece(Square::new(0, 4), Kind::King, Colour::Green);
        (rules, state)
    }

    #[test]
    fn test_single_ply_expands_once_and_credits_winner() {
        let (rules, state) = capture_in_one();
        let mut ctx = SearchContext::new(Some(1));
        let outcome = run_simulation(&rules, &state, &config(10), &mut ctx).unwrap();

        // Blue's only move captures the red king.
        assert!(outcome.finished);
        assert_eq!(outcome.plies, 1);
        assert_eq!(outcome.winner, Some(Colour::Blue));
        assert_eq!(outcome.loser, Some(Colour::Red));
        assert_eq!(ctx.stats.len(), 1);

        let (fp, entry) = ctx.stats.iter().next().unwrap();
        assert_eq!(fp.mover, Colour::Blue);
        assert_eq!(*entry, crate::stats::Entry { plays: 1, wins: 1 });
    }

    #[test]
    fn test_at_most_one_expansion_per_rollout() {
        let rules = Skirmish::new(6, 6);
        let state = rules.initial_state().unwrap();
        let mut ctx = SearchContext::new(Some(11));
        for i in 1..=20 {
            if run_simulation(&rules, &state, &config(30), &mut ctx).is_some() {
                assert!(ctx.stats.len() <= i);
            }
        }
        assert!(!ctx.stats.is_empty());
    }

    #[test]
    fn test_move_cap_zero_plays_nothing() {
        let (rules, state) = capture_in_one();
        let mut ctx = SearchContext::new(Some(1));
        let outcome = run_simulation(&rules, &state, &config(0), &mut ctx).unwrap();
        assert_eq!(outcome.plies, 0);
        assert!(!outcome.finished);
        assert!(ctx.stats.is_empty());
    }

    #[test]
    fn test_stuck_player_ends_rollout() {
        let rules = Skirmish::new(2, 2);
        let state = rules
            .empty_state(Colour::Green)
            .with_piece(Square::new(0, 0), Kind::King, Colour::Blue)
            .with_piece(Square::new(1, 1), Kind::King, Colour::Red);
        let mut ctx = SearchContext::new(Some(1));
        let outcome = run_simulation(&rules, &state, &config(10), &mut ctx).unwrap();
        assert_eq!(outcome.plies, 0);
        assert!(!outcome.finished);
    }

    #[test]
    fn test_score_extremes_strict() {
        let rules = Skirmish::new(3, 3);
        let base = rules.empty_state(Colour::Blue);

        let tied = base.clone();
        assert_eq!(score_extremes(&rules, &tied), (None, None));

        let spread = base
            .clone()
            .with_score(Colour::Blue, 3)
            .with_score(Colour::Green, 1)
            .with_score(Colour::Red, 2);
        assert_eq!(score_extremes(&rules, &spread), (Some(Colour::Blue), Some(Colour::Green)));

        let top_tie = base.with_score(Colour::Blue, 5).with_score(Colour::Red, 5);
        assert_eq!(score_extremes(&rules, &top_tie), (None, Some(Colour::Green)));
    }

    /// Blue king between Red and Green kings; two quiet moves, no captures.
    fn quiet_strip() -> (Skirmish, SkirmishState) {
        let rules = Skirmish::new(1, 5);
        let state = rules
            .empty_state(Colour::Blue)
            .with_piece(Square::new(0, 2), Kind::King, Colour::Blue)
            .with_piece(Square::new(0, 0), Kind::King, Colour::Red)
            .with_piece(Square::new(0, 4), Kind::King, Colour::Green);
        (rules, state)
    }

    fn first_ply_fingerprints(
        rules: &Skirmish,
        state: &SkirmishState,
        moves: &[Move<Square>],
    ) -> Vec<Fingerprint<Square>> {
        moves
            .iter()
            .map(|&mv| {
                let next = rules.apply(state, mv).unwrap();
                Fingerprint::after_move(rules, &next, Colour::Blue, mv)
            })
            .collect()
    }

    #[test]
    fn test_preferred_move_requires_full_expansion() {
        let (rules, state) = quiet_strip();
        let moves = legal_moves(&rules, &state, Colour::Blue);
        assert_eq!(moves.len(), 2);

        let mut stats = StatsStore::new();
        let fps = first_ply_fingerprints(&rules, &state, &moves);

        stats.record_new(fps[0].clone());
        assert_eq!(preferred_move(&rules, &state, Colour::Blue, &moves, 1.0, &stats), None);

        stats.record_new(fps[1].clone());
        for _ in 0..4 {
            stats.increment_plays(&fps[0]);
            stats.increment_plays(&fps[1]);
        }
        stats.adjust_wins(&fps[1], 3);
        assert_eq!(
            preferred_move(&rules, &state, Colour::Blue, &moves, 1.0, &stats),
            Some(moves[1])
        );
    }

    #[test]
    fn test_preferred_move_skips_unplayable_candidate() {
        let (inner, state) = quiet_strip();
        let moves = legal_moves(&inner, &state, Colour::Blue);
        let fps = first_ply_fingerprints(&inner, &state, &moves);
        let rules = Refusing {
            inner,
            refused: vec![moves[0].to],
        };

        // Only the playable sibling is recorded, yet the set counts as expanded.
        let mut stats = StatsStore::new();
        stats.record_new(fps[1].clone());
        stats.increment_plays(&fps[1]);
        assert_eq!(
            preferred_move(&rules, &state, Colour::Blue, &moves, 1.0, &stats),
            Some(moves[1])
        );
    }

    #[test]
    fn test_refused_move_abandons_rollout() {
        let (inner, state) = quiet_strip();
        let moves = legal_moves(&inner, &state, Colour::Blue);
        let rules = Refusing {
            inner,
            refused: moves.iter().map(|m| m.to).collect(),
        };
        let mut ctx = SearchContext::new(Some(3));

        for _ in 0..10 {
            assert_eq!(run_simulation(&rules, &state, &config(10), &mut ctx), None);
        }
        assert!(ctx.stats.is_empty());
    }

    #[test]
    fn test_ucb1_policy_follows_preference() {
        let (rules, state) = quiet_strip();
        let moves = legal_moves(&rules, &state, Colour::Blue);
        let fps = first_ply_fingerprints(&rules, &state, &moves);

        // With no exploration bonus the sibling with a win is strictly preferred.
        let config = config(1)
            .with_exploration(0.0)
            .with_rollout_policy(RolloutPolicy::Ucb1);
        let mut ctx = SearchContext::new(Some(5));
        for fp in &fps {
            ctx.stats.record_new(fp.clone());
            ctx.stats.increment_plays(fp);
        }
        ctx.stats.adjust_wins(&fps[1], 1);

        for _ in 0..40 {
            run_simulation(&rules, &state, &config, &mut ctx).unwrap();
        }
        assert_eq!(ctx.stats.get(&fps[0]).map(|e| e.plays), Some(1));
        assert_eq!(ctx.stats.get(&fps[1]).map(|e| e.plays), Some(41));
        assert_eq!(ctx.stats.len(), 2);
    }
}
