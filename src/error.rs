//! Error types for the rules contract and the search.

use thiserror::Error;

/// Why a rules engine refused to produce a successor state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The source square holds no piece.
    #[error("no piece on the source square")]
    EmptySquare,

    /// The move does not follow any step pattern of the moving piece.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A position could not be constructed (stepped off the board).
    #[error("position is off the board")]
    OffBoard,

    /// The game is already over.
    #[error("game is already over")]
    GameOver,
}

/// Errors that can occur during a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The root player has nothing to play.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// The search parameters cannot drive a search.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}
