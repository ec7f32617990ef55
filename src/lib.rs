//! Trichess-MCTS: time-boxed Monte Carlo Tree Search for three-player chess.
//!
//! Given a position and a wall-clock budget, the search runs randomized
//! rollouts, keeps play/win statistics per game-tree edge, and returns the
//! `(from, to)` move with the best observed win rate for the player to act.
//! Each game has one winner, one loser and one neutral player, so outcomes
//! are credited three ways.
//!
//! The game itself is supplied through the [`rules::Rules`] trait.
//!
//! ## Modules
//!
//! - [`rules`] - Rules-engine contract, players and moves
//! - [`movegen`] - Legal move enumeration from step primitives
//! - [`fingerprint`] - Statistics table keys
//! - [`stats`] - Play/win statistics store
//! - [`ucb`] - UCB1 selection
//! - [`playout`] - Rollouts and backpropagation
//! - [`mcts`] - Search loop and move decision
//! - [`config`] / [`constants`] - Search parameters
//! - [`skirmish`] - A small three-player game implementing the rules contract
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use trichess_mcts::mcts::choose_move;
//! use trichess_mcts::skirmish::Skirmish;
//!
//! let rules = Skirmish::new(6, 6);
//! let state = rules.initial_state().unwrap();
//!
//! let mv = choose_move(&rules, &state, Duration::from_millis(50), 40, 2f64.sqrt()).unwrap();
//! println!("Best move: {mv}");
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod mcts;
pub mod movegen;
pub mod playout;
pub mod rules;
pub mod skirmish;
pub mod stats;
pub mod ucb;

#[cfg(test)]
pub(crate) mod testing;
