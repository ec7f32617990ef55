//! Legal move enumeration built on the rules engine's step primitives.
//!
//! Every piece of the acting player walks each of its step patterns. Leapers
//! take one step, sliders repeat the step until they leave the board or reach
//! an occupied square. Each candidate destination is checked against the
//! legality oracle, so the generator itself knows nothing about captures,
//! pawn pushes or castling rights.

use crate::rules::{Colour, Move, Rules};

/// All legal moves for `colour` in `state`, in generation order without
/// duplicates. An empty result is valid (the player is stuck).
pub fn legal_moves<R: Rules>(rules: &R, state: &R::State, colour: Colour) -> Vec<Move<R::Position>> {
    let mut moves = Vec::new();

    for from in rules.positions_of(state, colour) {
        let Some(piece) = rules.piece_at(state, from) else {
            continue;
        };
        let reps = rules.step_reps(piece.kind);

        for step in rules.steps(piece.kind) {
            let mut step = step;
            let mut at = from;
            for _ in 0..reps {
                let Some((next, next_step)) = rules.step(piece, &step, at) else {
                    break; // off the board
                };
                if rules.is_legal(state, from, next, colour) {
                    push_unique(&mut moves, Move::new(from, next));
                }
                // Sliders stop at the first occupied square.
                if rules.piece_at(state, next).is_some() {
                    break;
                }
                at = next;
                step = next_step;
            }
        }

        for to in rules.special_destinations(state, from) {
            if rules.is_legal(state, from, to, colour) {
                push_unique(&mut moves, Move::new(from, to));
            }
        }
    }

    moves
}

fn push_unique<P: PartialEq>(moves: &mut Vec<Move<P>>, mv: Move<P>) {
    if !moves.contains(&mv) {
        moves.push(mv);
    }
}
