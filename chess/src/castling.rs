//! Castling eligibility.
//!
//! Castling is proposed as a two-file king move; this module decides whether
//! the compound move is allowed. The rook relocation itself is done by the
//! move applier in [`game`](crate::game).

use crate::attack;
use crate::board::Board;
use crate::rules;
use lynxchess_base::types::{File, Piece, PieceKind, Square};

/// Returns `true` if `king`, standing on `from`, may castle in the
/// direction given by the sign of `delta_file` (+2 kingside, -2 queenside).
///
/// Checked, in order: the king has never moved; the matching rook exists on
/// the king's rank and has never moved; every square strictly between king
/// and rook is empty; the king is not currently in check; and none of the
/// squares the king crosses or lands on is attacked while the king stands
/// there (origin vacated for the simulation).
pub fn can_castle(b: &Board, king: Piece, from: Square, delta_file: i8) -> bool {
    if king.has_moved {
        return false;
    }

    let rank = from.rank();
    let rook_file = if delta_file > 0 { File::H } else { File::A };
    let rook_sq = Square::from_parts(rook_file, rank);
    let rook = match b.get(rook_sq) {
        Some(p) => p,
        None => return false,
    };
    if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved {
        return false;
    }

    // every square strictly between king and rook must be empty
    if !rules::is_path_clear(b, from, rook_sq) {
        return false;
    }

    // castling out of check is not allowed
    let enemy = king.color.opposite();
    if attack::is_square_attacked(b, from, enemy) {
        return false;
    }

    // nor through or into check: simulate the king on every square it
    // crosses or lands on, with the origin vacated
    let step = delta_file.signum();
    let mut scratch = b.clone();
    scratch.put(from, None);
    for i in 1..=2 {
        let sq = match from.try_shift(step * i, 0) {
            Some(sq) => sq,
            None => return false,
        };
        let prev = scratch.get(sq);
        scratch.put(sq, Some(king));
        let attacked = attack::is_square_attacked(&scratch, sq, enemy);
        scratch.put(sq, prev);
        if attacked {
            return false;
        }
    }

    true
}
