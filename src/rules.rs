//! The rules-engine contract consumed by the search.
//!
//! The search never decides on its own what a piece may do. Everything it
//! knows about the game comes through the [`Rules`] trait: whose turn it is,
//! where the pieces stand, how each piece steps across the board, whether a
//! move is legal, and how the game is scored.
//!
//! Stepping is expressed with `Option` rather than errors: a step that leaves
//! the board simply yields `None` and the caller moves on to the next ray.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use crate::error::RulesError;

/// One of the three players, in turn order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    Blue,
    Green,
    Red,
}

impl Colour {
    /// All players in turn order.
    pub const ALL: [Colour; 3] = [Colour::Blue, Colour::Green, Colour::Red];

    /// The player who moves after this one.
    pub fn next(self) -> Colour {
        match self {
            Colour::Blue => Colour::Green,
            Colour::Green => Colour::Red,
            Colour::Red => Colour::Blue,
        }
    }

    /// The other two players, in turn order starting after `self`.
    pub fn others(self) -> [Colour; 2] {
        let first = self.next();
        [first, first.next()]
    }

    /// Index of this player in [`Colour::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Colour::Blue => "blue",
            Colour::Green => "green",
            Colour::Red => "red",
        };
        f.write_str(name)
    }
}

/// A move from one square to another. Not validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move<P> {
    pub from: P,
    pub to: P,
}

impl<P> Move<P> {
    pub fn new(from: P, to: P) -> Self {
        Self { from, to }
    }
}

impl<P: fmt::Display> fmt::Display for Move<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The occupant of a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PieceInfo<K> {
    pub kind: K,
    pub colour: Colour,
}

/// A three-player board game as seen by the search.
///
/// Implementations must treat states as values: [`Rules::apply`] returns a new
/// state and leaves its argument untouched, because the search keeps the
/// pre-move state around to fingerprint sibling moves.
pub trait Rules {
    /// A full game state. Cloning must produce an independent copy.
    type State: Clone;
    /// A square on the board.
    type Position: Copy + Eq + Ord + Hash + fmt::Debug;
    /// A piece type (king, rook, ...).
    type Kind: Copy + fmt::Debug;
    /// One step pattern of a piece, e.g. "forward-left".
    type Step: Clone;

    /// The player to act.
    fn turn(&self, state: &Self::State) -> Colour;

    /// Every square occupied by `colour`.
    fn positions_of(&self, state: &Self::State, colour: Colour) -> BTreeSet<Self::Position>;

    /// The piece standing on `pos`, if any.
    fn piece_at(&self, state: &Self::State, pos: Self::Position) -> Option<PieceInfo<Self::Kind>>;

    /// Step patterns available to a piece type.
    fn steps(&self, kind: Self::Kind) -> Vec<Self::Step>;

    /// How many times a step pattern may be repeated (1 for leapers, board
    /// length for sliders).
    fn step_reps(&self, kind: Self::Kind) -> usize;

    /// Take one step from `from`.
    ///
    /// Returns the square reached together with the step to use for the next
    /// repetition, which may differ from `step` when the ray crosses into a
    /// differently oriented board section. `None` means the step left the board.
    fn step(
        &self,
        piece: PieceInfo<Self::Kind>,
        step: &Self::Step,
        from: Self::Position,
    ) -> Option<(Self::Position, Self::Step)>;

    /// Destinations reachable by special moves (castling) from `from`.
    fn special_destinations(&self, _state: &Self::State, _from: Self::Position) -> Vec<Self::Position> {
        Vec::new()
    }

    /// Legality oracle.
    fn is_legal(
        &self,
        state: &Self::State,
        from: Self::Position,
        to: Self::Position,
        colour: Colour,
    ) -> bool;

    /// The state after playing `mv`. Must not mutate `state`.
    fn apply(&self, state: &Self::State, mv: Move<Self::Position>) -> Result<Self::State, RulesError>;

    /// Whether the game has ended.
    fn is_over(&self, state: &Self::State) -> bool;

    /// The winner of a finished game.
    fn winner(&self, state: &Self::State) -> Option<Colour>;

    /// The loser of a finished game.
    fn loser(&self, state: &Self::State) -> Option<Colour>;

    /// Current score of `colour`.
    fn score(&self, state: &Self::State, colour: Colour) -> i32;
}
