//! Time-boxed Monte Carlo Tree Search.
//!
//! The search repeatedly runs rollouts from fresh copies of the root state,
//! all sharing one statistics table, until the wall-clock budget runs out.
//! It then picks, among every recorded fingerprint whose move is legal for
//! the root player right now, the one with the best `wins / plays` ratio.
//!
//! The table is built from scratch on every call and dropped afterwards.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SearchConfig;
use crate::constants::SCHEDULING_OVERHEAD;
use crate::error::SearchError;
use crate::movegen::legal_moves;
use crate::playout::{SearchContext, run_simulation};
use crate::rules::{Colour, Move, Rules};
use crate::stats::StatsStore;

/// Statistics of one root candidate, as reported after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<P> {
    pub mv: Move<P>,
    /// Player who owned the fingerprint the statistics were collected under.
    pub mover: Colour,
    pub plays: u32,
    pub wins: i32,
}

impl<P> Candidate<P> {
    pub fn win_rate(&self) -> Option<f64> {
        (self.plays > 0).then(|| f64::from(self.wins) / f64::from(self.plays))
    }
}

/// Result of one move decision.
#[derive(Clone, Debug)]
pub struct SearchReport<P> {
    /// The chosen move.
    pub best: Move<P>,
    /// Win rate behind the choice; `None` when a fallback was used.
    pub win_rate: Option<f64>,
    /// Completed rollouts.
    pub simulations: usize,
    /// Rollouts dropped because the rules engine refused a move.
    pub abandoned: usize,
    /// Wall-clock time spent, including the final decision.
    pub elapsed: Duration,
    /// Recorded fingerprints legal at the root, in recording order.
    pub candidates: Vec<Candidate<P>>,
}

/// Runs move decisions for one rules engine with fixed parameters.
pub struct Searcher<'a, R: Rules> {
    rules: &'a R,
    config: SearchConfig,
}

impl<'a, R: Rules> Searcher<'a, R> {
    pub fn new(rules: &'a R, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { rules, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `root` for the player to act and report the decision.
    ///
    /// Fails only when that player has no legal move.
    pub fn search(&self, root: &R::State) -> Result<SearchReport<R::Position>, SearchError> {
        let start = Instant::now();
        let player = self.rules.turn(root);
        let root_moves = legal_moves(self.rules, root, player);
        if root_moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut ctx = SearchContext::new(self.config.seed);
        let mut simulations = 0;
        let mut abandoned = 0;

        // The budget is checked between rollouts only; one in flight always completes.
        while start.elapsed() + SCHEDULING_OVERHEAD < self.config.time_budget {
            match run_simulation(self.rules, root, &self.config, &mut ctx) {
                Some(_) => simulations += 1,
                None => abandoned += 1,
            }
        }

        let (best, win_rate) = decide(self.rules, root, player, &ctx.stats, &root_moves);
        let candidates = root_candidates(self.rules, root, player, &ctx.stats);
        let elapsed = start.elapsed();

        debug!(
            %player,
            simulations,
            abandoned,
            recorded = ctx.stats.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            best = ?best,
            win_rate,
            "search complete"
        );

        Ok(SearchReport {
            best,
            win_rate,
            simulations,
            abandoned,
            elapsed,
            candidates,
        })
    }
}

/// Choose a move for the player to act in `state`.
pub fn choose_move<R: Rules>(
    rules: &R,
    state: &R::State,
    time_budget: Duration,
    move_cap: usize,
    exploration: f64,
) -> Result<Move<R::Position>, SearchError> {
    let config = SearchConfig::default()
        .with_time_budget(time_budget)
        .with_move_cap(move_cap)
        .with_exploration(exploration);
    Searcher::new(rules, config)?.search(state).map(|report| report.best)
}

/// Pick the decision from the statistics table.
///
/// Among recorded fingerprints whose move is legal for `player` in `root`,
/// the highest win rate wins and the earliest recorded breaks ties. Without any
/// played candidate, falls back to the first legal recorded move and then to
/// the first legal root move. `root_moves` must not be empty.
pub fn decide<R: Rules>(
    rules: &R,
    root: &R::State,
    player: Colour,
    stats: &StatsStore<R::Position>,
    root_moves: &[Move<R::Position>],
) -> (Move<R::Position>, Option<f64>) {
    let mut best: Option<(Move<R::Position>, f64)> = None;
    let mut first_legal = None;

    for (fp, entry) in stats.iter() {
        if !rules.is_legal(root, fp.mv.from, fp.mv.to, player) {
            continue;
        }
        first_legal.get_or_insert(fp.mv);
        let Some(rate) = entry.win_rate() else {
            continue;
        };
        match best {
            Some((_, best_rate)) if rate <= best_rate => {}
            _ => best = Some((fp.mv, rate)),
        }
    }

    match (best, first_legal) {
        (Some((mv, rate)), _) => (mv, Some(rate)),
        (None, Some(mv)) => (mv, None),
        (None, None) => (root_moves[0], None),
    }
}

fn root_candidates<R: Rules>(
    rules: &R,
    root: &R::State,
    player: Colour,
    stats: &StatsStore<R::Position>,
) -> Vec<Candidate<R::Position>> {
    stats
        .iter()
        .filter(|(fp, _)| rules.is_legal(root, fp.mv.from, fp.mv.to, player))
        .map(|(fp, entry)| Candidate {
            mv: fp.mv,
            mover: fp.mover,
            plays: entry.plays,
            wins: entry.wins,
        })
        .collect()
}

/// Log the root candidates of a report, best first.
pub fn dump_candidates<P: std::fmt::Debug>(report: &SearchReport<P>) {
    let mut ranked: Vec<_> = report.candidates.iter().collect();
    ranked.sort_by(|a, b| {
        b.win_rate()
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.win_rate().unwrap_or(f64::NEG_INFINITY))
    });
    for c in ranked {
        debug!(
            mv = ?c.mv,
            mover = %c.mover,
            plays = c.plays,
            wins = c.wins,
            rate = c.win_rate().unwrap_or(0.0),
            "candidate"
        );
    }
}
