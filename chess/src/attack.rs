//! Attack detection: whether a square is reachable by a capture of a given
//! color, and whether a king stands in check.
//!
//! Attacks are "possible captures", not legal moves; a piece keeps attacking
//! a square even when moving there would expose its own king.

use crate::board::Board;
use crate::rules;
use lynxchess_base::geometry;
use lynxchess_base::types::{Color, PieceKind, Square};

/// Returns `true` if any piece of `by` could capture onto `target` in one
/// step per the shape rules.
///
/// Pawns count only with their diagonal capture pattern; the forward push
/// never attacks anything. Kings count with their ordinary one-step reach
/// (castling is not an attack).
pub fn is_square_attacked(b: &Board, target: Square, by: Color) -> bool {
    for (from, piece) in b.pieces_of(by) {
        if from == target {
            continue;
        }
        let (df, dr) = rules::deltas(from, target);
        let reaches = match piece.kind {
            PieceKind::Pawn => df.abs() == 1 && dr == geometry::pawn_dir(by),
            PieceKind::Knight => rules::knight_reaches(df, dr),
            PieceKind::Bishop => rules::bishop_reaches(b, from, target, df, dr),
            PieceKind::Rook => rules::rook_reaches(b, from, target, df, dr),
            PieceKind::Queen => rules::queen_reaches(b, from, target, df, dr),
            PieceKind::King => rules::king_steps(df, dr),
        };
        if reaches {
            return true;
        }
    }
    false
}

/// Returns `true` if `color`'s king is attacked by the opponent.
///
/// A board without that king is reported as not in check.
pub fn king_in_check(b: &Board, color: Color) -> bool {
    match b.king_pos(color) {
        Some(sq) => is_square_attacked(b, sq, color.opposite()),
        None => false,
    }
}
