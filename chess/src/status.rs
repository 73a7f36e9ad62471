//! Game-state classification: check, checkmate and stalemate via exhaustive
//! legal-move enumeration.

use crate::attack;
use crate::board::Board;
use crate::rules;
use lynxchess_base::types::{Color, Square};

use std::fmt;

/// Verdict over a position, evaluated for the side to move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Ongoing,
    /// The side to move is checkmated; `winner` is the other color.
    Checkmate { winner: Color },
    /// The side to move has no legal moves but is not in check.
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Returns `true` if `color` has at least one legal move.
///
/// Exhaustive over all (piece, target) pairs with an early exit. O(pieces x
/// 64) legality calls, each at worst O(path length); fine at this scale.
pub fn has_legal_moves(b: &Board, color: Color) -> bool {
    for (from, _) in b.pieces_of(color) {
        for to in Square::iter() {
            if rules::is_valid_move_for(b, from, to, color) {
                return true;
            }
        }
    }
    false
}

pub fn is_checkmate(b: &Board, color: Color) -> bool {
    attack::king_in_check(b, color) && !has_legal_moves(b, color)
}

pub fn is_stalemate(b: &Board, color: Color) -> bool {
    !attack::king_in_check(b, color) && !has_legal_moves(b, color)
}

/// Classifies the position for the side to move.
pub fn evaluate(b: &Board) -> GameStatus {
    let side = b.side();
    if has_legal_moves(b, side) {
        return GameStatus::Ongoing;
    }
    if attack::king_in_check(b, side) {
        GameStatus::Checkmate {
            winner: side.opposite(),
        }
    } else {
        GameStatus::Stalemate
    }
}
