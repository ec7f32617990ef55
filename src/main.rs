//! Trichess-MCTS command-line demo.
//!
//! Drives the search on the built-in skirmish board.
//!
//! ## Usage
//!
//! - `trichess-mcts` - Choose one move from the opening position
//! - `trichess-mcts choose` - Same, with a table of root candidates
//! - `trichess-mcts selfplay` - Let the search play all three sides

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use trichess_mcts::config::{RolloutPolicy, SearchConfig};
use trichess_mcts::constants::{
    DEFAULT_EXPLORATION, DEFAULT_MOVE_CAP, DEFAULT_TIME_BUDGET_MS, SELFPLAY_MAX_PLIES,
    SKIRMISH_COLS, SKIRMISH_ROWS,
};
use trichess_mcts::mcts::{Searcher, dump_candidates};
use trichess_mcts::rules::{Colour, Rules};
use trichess_mcts::skirmish::Skirmish;

/// Largest board edge the CLI accepts, so files stay lettered `a` to `z`.
const MAX_BOARD_DIM: i64 = 26;

/// Trichess-MCTS: time-boxed MCTS for three-player chess
#[derive(Parser)]
#[command(name = "trichess-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    search: SearchArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a single move from the opening position
    Choose,
    /// Play a full game with the search moving for every player
    Selfplay {
        /// Stop after this many plies if nobody has won
        #[arg(long, default_value_t = SELFPLAY_MAX_PLIES)]
        max_plies: usize,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Time budget per move in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    time_ms: u64,

    /// Maximum plies per rollout
    #[arg(long, global = true, default_value_t = DEFAULT_MOVE_CAP)]
    move_cap: usize,

    /// UCB1 exploration constant
    #[arg(long, global = true, default_value_t = DEFAULT_EXPLORATION)]
    exploration: f64,

    /// How rollouts pick their moves
    #[arg(long, global = true, value_enum, default_value_t = PolicyArg::Uniform)]
    policy: PolicyArg,

    /// Seed for reproducible rollouts
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Board rows
    #[arg(long, global = true, default_value_t = SKIRMISH_ROWS,
          value_parser = clap::value_parser!(u8).range(1..=MAX_BOARD_DIM))]
    rows: u8,

    /// Board columns
    #[arg(long, global = true, default_value_t = SKIRMISH_COLS,
          value_parser = clap::value_parser!(u8).range(1..=MAX_BOARD_DIM))]
    cols: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Uniform,
    Ucb1,
}

impl SearchArgs {
    fn to_config(&self) -> SearchConfig {
        let policy = match self.policy {
            PolicyArg::Uniform => RolloutPolicy::Uniform,
            PolicyArg::Ucb1 => RolloutPolicy::Ucb1,
        };
        let config = SearchConfig::default()
            .with_time_budget(Duration::from_millis(self.time_ms))
            .with_move_cap(self.move_cap)
            .with_exploration(self.exploration)
            .with_rollout_policy(policy);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let rules = Skirmish::new(cli.search.rows, cli.search.cols);
    let searcher = Searcher::new(&rules, cli.search.to_config()).context("invalid search parameters")?;

    match cli.command {
        Some(Commands::Selfplay { max_plies }) => run_selfplay(&rules, &searcher, max_plies),
        Some(Commands::Choose) | None => run_choose(&rules, &searcher),
    }
}

fn run_choose(rules: &Skirmish, searcher: &Searcher<'_, Skirmish>) -> Result<()> {
    let state = rules.initial_state().context("board too small for the opening position")?;
    let report = searcher.search(&state).context("search failed")?;

    dump_candidates(&report);
    println!(
        "{}x{} board, {} ms budget",
        rules.rows(),
        rules.cols(),
        searcher.config().time_budget.as_millis()
    );
    println!("{} plays {}", rules.turn(&state), report.best);
    println!(
        "simulations: {}, elapsed: {} ms, win rate: {:.3}",
        report.simulations,
        report.elapsed.as_millis(),
        report.win_rate.unwrap_or(0.0)
    );
    Ok(())
}

fn run_selfplay(rules: &Skirmish, searcher: &Searcher<'_, Skirmish>, max_plies: usize) -> Result<()> {
    let mut state = rules.initial_state().context("board too small for the opening position")?;
    info!(
        rows = rules.rows(),
        cols = rules.cols(),
        move_cap = searcher.config().move_cap,
        "starting self-play"
    );

    for ply in 0..max_plies {
        if rules.is_over(&state) {
            break;
        }
        let player = rules.turn(&state);
        let report = match searcher.search(&state) {
            Ok(report) => report,
            Err(err) => {
                info!(ply, %player, %err, "player cannot move, stopping");
                break;
            }
        };
        println!("{:>3}. {:<5} {}", ply + 1, player.to_string(), report.best);
        state = rules
            .apply(&state, report.best)
            .with_context(|| format!("search chose an unplayable move {}", report.best))?;
    }

    match (rules.winner(&state), rules.loser(&state)) {
        (Some(winner), Some(loser)) => println!("{winner} wins, {loser} loses"),
        _ => {
            let scores: Vec<String> = Colour::ALL
                .iter()
                .map(|&c| format!("{c}={}", rules.score(&state, c)))
                .collect();
            println!("no result, scores: {}", scores.join(" "));
        }
    }
    Ok(())
}
