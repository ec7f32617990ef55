//! A small three-player board game implementing [`Rules`].
//!
//! Skirmish is played on a rectangular board with kings, rooks and knights.
//! Players move in the usual Blue → Green → Red order. Capturing a piece scores
//! its value for the captor, and capturing a king ends the game at once: the
//! captor wins and the player whose king fell loses.
//!
//! It exists to drive the search from the command line and from tests. The
//! geometry is plain (no board sections, no castling), but it goes through the
//! same step/legality contract a full three-player chess engine would.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::RulesError;
use crate::rules::{Colour, Move, PieceInfo, Rules};

/// A square, addressed by row and column from the bottom-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Square {
    /// Formats as file letter + rank number, e.g. `a1`. Files past `z` are
    /// written as a number followed by a colon, e.g. `27:1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = u16::from(self.row) + 1;
        if self.col < 26 {
            write!(f, "{}{}", char::from(b'a' + self.col), rank)
        } else {
            write!(f, "{}:{}", u16::from(self.col) + 1, rank)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    King,
    Rook,
    Knight,
}

impl Kind {
    /// Score awarded for capturing this piece.
    pub fn value(self) -> i32 {
        match self {
            Kind::King => 10,
            Kind::Rook => 5,
            Kind::Knight => 3,
        }
    }
}

/// A row/column offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Offset {
    pub dr: i8,
    pub dc: i8,
}

const fn off(dr: i8, dc: i8) -> Offset {
    Offset { dr, dc }
}

const KING_STEPS: [Offset; 8] = [
    off(1, 0),
    off(-1, 0),
    off(0, 1),
    off(0, -1),
    off(1, 1),
    off(1, -1),
    off(-1, 1),
    off(-1, -1),
];

const ROOK_STEPS: [Offset; 4] = [off(1, 0), off(-1, 0), off(0, 1), off(0, -1)];

const KNIGHT_STEPS: [Offset; 8] = [
    off(2, 1),
    off(2, -1),
    off(-2, 1),
    off(-2, -1),
    off(1, 2),
    off(1, -2),
    off(-1, 2),
    off(-1, -2),
];

/// A skirmish position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkirmishState {
    pieces: BTreeMap<Square, PieceInfo<Kind>>,
    turn: Colour,
    scores: [i32; 3],
    /// `(winner, loser)` once a king has been captured.
    result: Option<(Colour, Colour)>,
}

impl SkirmishState {
    /// Place a piece, replacing whatever stood on `square`.
    pub fn with_piece(mut self, square: Square, kind: Kind, colour: Colour) -> Self {
        self.pieces.insert(square, PieceInfo { kind, colour });
        self
    }

    /// Override a player's score.
    pub fn with_score(mut self, colour: Colour, score: i32) -> Self {
        self.scores[colour.index()] = score;
        self
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

/// The skirmish rules for a board of a given size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Skirmish {
    rows: u8,
    cols: u8,
}

impl Skirmish {
    pub fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// An empty board with `turn` to move.
    pub fn empty_state(&self, turn: Colour) -> SkirmishState {
        SkirmishState {
            pieces: BTreeMap::new(),
            turn,
            scores: [0; 3],
            result: None,
        }
    }

    /// The opening position: Blue along the bottom edge, Green along the top
    /// edge and Red down the right-hand edge, each with a rook, a king and a
    /// knight. Needs at least 5 rows and 4 columns.
    pub fn initial_state(&self) -> Result<SkirmishState, RulesError> {
        if self.rows < 5 || self.cols < 4 {
            return Err(RulesError::OffBoard);
        }
        let top = self.rows - 1;
        let right = self.cols - 1;
        let state = self
            .empty_state(Colour::Blue)
            .with_piece(Square::new(0, 0), Kind::Rook, Colour::Blue)
            .with_piece(Square::new(0, 1), Kind::King, Colour::Blue)
            .with_piece(Square::new(0, 2), Kind::Knight, Colour::Blue)
            .with_piece(Square::new(top, 0), Kind::Rook, Colour::Green)
            .with_piece(Square::new(top, 1), Kind::King, Colour::Green)
            .with_piece(Square::new(top, 2), Kind::Knight, Colour::Green)
            .with_piece(Square::new(1, right), Kind::Knight, Colour::Red)
            .with_piece(Square::new(2, right), Kind::King, Colour::Red)
            .with_piece(Square::new(3, right), Kind::Rook, Colour::Red);
        Ok(state)
    }

    fn offset(&self, from: Square, step: Offset) -> Option<Square> {
        let row = i16::from(from.row) + i16::from(step.dr);
        let col = i16::from(from.col) + i16::from(step.dc);
        if row < 0 || col < 0 || row >= i16::from(self.rows) || col >= i16::from(self.cols) {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }

    fn on_board(&self, sq: Square) -> bool {
        sq.row < self.rows && sq.col < self.cols
    }

    /// Whether `to` lies on one of the piece's rays from `from`, without
    /// passing through another piece.
    fn reaches(&self, state: &SkirmishState, piece: PieceInfo<Kind>, from: Square, to: Square) -> bool {
        let reps = self.step_reps(piece.kind);
        for step in self.steps(piece.kind) {
            let mut at = from;
            for _ in 0..reps {
                let Some(next) = self.offset(at, step) else {
                    break;
                };
                if next == to {
                    return true;
                }
                if state.pieces.contains_key(&next) {
                    break;
                }
                at = next;
            }
        }
        false
    }
}

impl Rules for Skirmish {
    type State = SkirmishState;
    type Position = Square;
    type Kind = Kind;
    type Step = Offset;

    fn turn(&self, state: &SkirmishState) -> Colour {
        state.turn
    }

    fn positions_of(&self, state: &SkirmishState, colour: Colour) -> BTreeSet<Square> {
        state
            .pieces
            .iter()
            .filter(|(_, p)| p.colour == colour)
            .map(|(sq, _)| *sq)
            .collect()
    }

    fn piece_at(&self, state: &SkirmishState, pos: Square) -> Option<PieceInfo<Kind>> {
        state.pieces.get(&pos).copied()
    }

    fn steps(&self, kind: Kind) -> Vec<Offset> {
        match kind {
            Kind::King => KING_STEPS.to_vec(),
            Kind::Rook => ROOK_STEPS.to_vec(),
            Kind::Knight => KNIGHT_STEPS.to_vec(),
        }
    }

    fn step_reps(&self, kind: Kind) -> usize {
        match kind {
            Kind::Rook => usize::from(self.rows.max(self.cols)),
            Kind::King | Kind::Knight => 1,
        }
    }

    fn step(&self, _piece: PieceInfo<Kind>, step: &Offset, from: Square) -> Option<(Square, Offset)> {
        self.offset(from, *step).map(|sq| (sq, *step))
    }

    fn is_legal(&self, state: &SkirmishState, from: Square, to: Square, colour: Colour) -> bool {
        let Some(mover) = state.pieces.get(&from).copied() else {
            return false;
        };
        if mover.colour != colour || !self.on_board(to) || from == to {
            return false;
        }
        if let Some(target) = state.pieces.get(&to) {
            if target.colour == colour {
                return false;
            }
        }
        self.reaches(state, mover, from, to)
    }

    fn apply(&self, state: &SkirmishState, mv: Move<Square>) -> Result<SkirmishState, RulesError> {
        if state.result.is_some() {
            return Err(RulesError::GameOver);
        }
        let mover = state
            .pieces
            .get(&mv.from)
            .copied()
            .ok_or(RulesError::EmptySquare)?;
        if !self.on_board(mv.to) {
            return Err(RulesError::OffBoard);
        }
        if !self.is_legal(state, mv.from, mv.to, state.turn) {
            return Err(RulesError::IllegalMove(format!("{} -> {}", mv.from, mv.to)));
        }

        let mut next = state.clone();
        next.pieces.remove(&mv.from);
        if let Some(captured) = next.pieces.insert(mv.to, mover) {
            next.scores[mover.colour.index()] += captured.kind.value();
            if captured.kind == Kind::King {
                next.result = Some((mover.colour, captured.colour));
            }
        }
        next.turn = state.turn.next();
        Ok(next)
    }

    fn is_over(&self, state: &SkirmishState) -> bool {
        state.result.is_some()
    }

    fn winner(&self, state: &SkirmishState) -> Option<Colour> {
        state.result.map(|(winner, _)| winner)
    }

    fn loser(&self, state: &SkirmishState) -> Option<Colour> {
        state.result.map(|(_, loser)| loser)
    }

    fn score(&self, state: &SkirmishState, colour: Colour) -> i32 {
        state.scores[colour.index()]
    }
}
