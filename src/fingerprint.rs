//! Canonical keys for the statistics table.
//!
//! A fingerprint identifies an edge of the game tree: which player moved,
//! which move they played, and where every piece stands afterwards, split
//! into "the mover's squares" and "everyone else's squares". Piece types,
//! castling rights and move counters are not part of the key, so distinct
//! states can alias. Identical arrangements never produce different keys.

use std::collections::BTreeSet;

use crate::rules::{Colour, Move, Rules};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint<P: Ord> {
    /// The player who made the move.
    pub mover: Colour,
    /// The move itself.
    pub mv: Move<P>,
    /// Squares held by the mover after the move.
    pub own: BTreeSet<P>,
    /// Squares held by the other two players combined after the move.
    pub others: BTreeSet<P>,
}

impl<P: Ord + Copy> Fingerprint<P> {
    /// Fingerprint of `state_after`, reached by `mover` playing `mv`.
    pub fn after_move<R>(rules: &R, state_after: &R::State, mover: Colour, mv: Move<P>) -> Self
    where
        R: Rules<Position = P>,
    {
        let [a, b] = mover.others();
        let mut others = rules.positions_of(state_after, a);
        others.extend(rules.positions_of(state_after, b));
        Self {
            mover,
            mv,
            own: rules.positions_of(state_after, mover),
            others,
        }
    }
}
