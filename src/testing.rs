//! Rules engines used only by unit tests.

use std::collections::BTreeSet;

use crate::error::RulesError;
use crate::rules::{Colour, Move, PieceInfo, Rules};
use crate::skirmish::{Kind, Offset, Skirmish, SkirmishState, Square};

/// A single Blue slider on squares `0..len` of a line.
///
/// The slider steps by one until it reaches square 2, then by two, the way a
/// ray bends when it crosses into another board section. Square `special` is
/// offered as a castling-style destination.
pub(crate) struct LineRules {
    pub len: u8,
    pub special: u8,
}

impl Rules for LineRules {
    type State = ();
    type Position = u8;
    type Kind = ();
    type Step = u8;

    fn turn(&self, _state: &()) -> Colour {
        Colour::Blue
    }

    fn positions_of(&self, _state: &(), colour: Colour) -> BTreeSet<u8> {
        if colour == Colour::Blue {
            BTreeSet::from([0])
        } else {
            BTreeSet::new()
        }
    }

    fn piece_at(&self, _state: &(), pos: u8) -> Option<PieceInfo<()>> {
        (pos == 0).then_some(PieceInfo {
            kind: (),
            colour: Colour::Blue,
        })
    }

    fn steps(&self, _kind: ()) -> Vec<u8> {
        vec![1]
    }

    fn step_reps(&self, _kind: ()) -> usize {
        usize::from(self.len)
    }

    fn step(&self, _piece: PieceInfo<()>, step: &u8, from: u8) -> Option<(u8, u8)> {
        let next = from + step;
        if next >= self.len {
            return None;
        }
        let next_step = if next >= 2 { 2 } else { *step };
        Some((next, next_step))
    }

    fn special_destinations(&self, _state: &(), from: u8) -> Vec<u8> {
        if from == 0 { vec![self.special] } else { Vec::new() }
    }

    fn is_legal(&self, _state: &(), from: u8, to: u8, colour: Colour) -> bool {
        colour == Colour::Blue && from == 0 && to != 0 && to < self.len
    }

    fn apply(&self, _state: &(), _mv: Move<u8>) -> Result<(), RulesError> {
        Ok(())
    }

    fn is_over(&self, _state: &()) -> bool {
        false
    }

    fn winner(&self, _state: &()) -> Option<Colour> {
        None
    }

    fn loser(&self, _state: &()) -> Option<Colour> {
        None
    }

    fn score(&self, _state: &(), _colour: Colour) -> i32 {
        0
    }
}

/// Skirmish rules whose `apply` refuses any move landing on `refused`.
pub(crate) struct Refusing {
    pub inner: Skirmish,
    pub refused: Vec<Square>,
}

impl Rules for Refusing {
    type State = SkirmishState;
    type Position = Square;
    type Kind = Kind;
    type Step = Offset;

    fn turn(&self, state: &SkirmishState) -> Colour {
        self.inner.turn(state)
    }

    fn positions_of(&self, state: &SkirmishState, colour: Colour) -> BTreeSet<Square> {
        self.inner.positions_of(state, colour)
    }

    fn piece_at(&self, state: &SkirmishState, pos: Square) -> Option<PieceInfo<Kind>> {
        self.inner.piece_at(state, pos)
    }

    fn steps(&self, kind: Kind) -> Vec<Offset> {
        self.inner.steps(kind)
    }

    fn step_reps(&self, kind: Kind) -> usize {
        self.inner.step_reps(kind)
    }

    fn step(&self, piece: PieceInfo<Kind>, step: &Offset, from: Square) -> Option<(Square, Offset)> {
        self.inner.step(piece, step, from)
    }

    fn is_legal(&self, state: &SkirmishState, from: Square, to: Square, colour: Colour) -> bool {
        self.inner.is_legal(state, from, to, colour)
    }

    fn apply(&self, state: &SkirmishState, mv: Move<Square>) -> Result<SkirmishState, RulesError> {
        if self.refused.contains(&mv.to) {
            return Err(RulesError::IllegalMove(format!("{} -> {}", mv.from, mv.to)));
        }
        self.inner.apply(state, mv)
    }

    fn is_over(&self, state: &SkirmishState) -> bool {
        self.inner.is_over(state)
    }

    fn winner(&self, state: &SkirmishState) -> Option<Colour> {
        self.inner.winner(state)
    }

    fn loser(&self, state: &SkirmishState) -> Option<Colour> {
        self.inner.loser(state)
    }

    fn score(&self, state: &SkirmishState, colour: Colour) -> i32 {
        self.inner.score(state, colour)
    }
}
