//! Default search parameters.
//!
//! These are the values the search falls back to when a [`SearchConfig`]
//! is built with `Default`. They match the budget the engine has always
//! been tuned for: one second per move and rollouts capped at 500 plies.
//!
//! [`SearchConfig`]: crate::config::SearchConfig

use std::time::Duration;

// =============================================================================
// Search Budget
// =============================================================================

/// Wall-clock budget for one move decision, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1000;

/// Maximum number of plies played by a single rollout.
pub const DEFAULT_MOVE_CAP: usize = 500;

/// UCB1 exploration constant (sqrt(2)).
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Scheduling overhead added to the elapsed time before each budget check,
/// so the loop does not start a simulation it cannot finish in time.
pub const SCHEDULING_OVERHEAD: Duration = Duration::from_micros(500);

// =============================================================================
// Demonstration Board
// =============================================================================

/// Default skirmish board height.
pub const SKIRMISH_ROWS: u8 = 6;

/// Default skirmish board width.
pub const SKIRMISH_COLS: u8 = 6;

/// Ply limit for a self-play game in the command-line demo.
pub const SELFPLAY_MAX_PLIES: usize = 200;
