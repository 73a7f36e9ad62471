//! Move legality: per-piece shape rules, path clearance and the self-check
//! filter.
//!
//! A move is valid when its shape rule passes *and* the mover's own king is
//! not attacked afterwards. The latter is decided by speculatively applying
//! the raw relocation on a scratch copy of the board, which is what makes
//! absolute and discovered pins fall out for free.

use crate::attack;
use crate::board::Board;
use crate::castling;
use crate::moves::Move;
use lynxchess_base::geometry;
use lynxchess_base::types::{Color, PieceKind, Square};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// List of moves, backed by a fixed-capacity vector.
///
/// 256 is a comfortable upper bound on the number of legal moves in any
/// reachable position.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns `true` if moving from `from` to `to` is legal for the side to
/// move, including the self-check filter.
pub fn is_valid_move(b: &Board, from: Square, to: Square) -> bool {
    is_valid_move_for(b, from, to, b.side())
}

/// Same as [`is_valid_move`], with the moving side given explicitly.
pub fn is_valid_move_for(b: &Board, from: Square, to: Square, side: Color) -> bool {
    let piece = match b.get(from) {
        Some(p) => p,
        None => return false,
    };
    if piece.color != side {
        return false;
    }
    if let Some(dst) = b.get(to) {
        if dst.color == side {
            return false;
        }
    }
    let (df, dr) = deltas(from, to);
    let shape_ok = match piece.kind {
        PieceKind::Pawn => pawn_reaches(b, piece.color, from, to, df, dr),
        PieceKind::Rook => rook_reaches(b, from, to, df, dr),
        PieceKind::Knight => knight_reaches(df, dr),
        PieceKind::Bishop => bishop_reaches(b, from, to, df, dr),
        PieceKind::Queen => queen_reaches(b, from, to, df, dr),
        PieceKind::King => {
            king_steps(df, dr) || (dr == 0 && df.abs() == 2 && castling::can_castle(b, piece, from, df))
        }
    };
    if !shape_ok {
        return false;
    }
    simulate_leaves_king_safe(b, from, to, side)
}

/// Collects every legal move of the side to move.
pub fn legal_moves(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    for (from, _) in b.pieces_of(b.side()) {
        for to in Square::iter() {
            if is_valid_move(b, from, to) {
                res.push(Move::new(from, to));
            }
        }
    }
    res
}

/// Collects every legal move of the piece standing on `from`, if any.
///
/// This is the engine-side counterpart of highlighting a lifted piece's
/// destinations in a front end.
pub fn legal_moves_from(b: &Board, from: Square) -> MoveList {
    let mut res = MoveList::new();
    for to in Square::iter() {
        if is_valid_move(b, from, to) {
            res.push(Move::new(from, to));
        }
    }
    res
}

#[inline]
pub(crate) fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file().index() as i8 - from.file().index() as i8,
        to.rank().index() as i8 - from.rank().index() as i8,
    )
}

/// Applies the raw `from -> to` relocation on a scratch copy and reports
/// whether `side`'s king is safe afterwards. Never mutates `b`.
///
/// Only the two endpoint squares change during the simulation; in
/// particular an en-passant victim is not lifted here.
pub(crate) fn simulate_leaves_king_safe(b: &Board, from: Square, to: Square, side: Color) -> bool {
    let mut scratch = b.clone();
    scratch.move_piece_raw(from, to);
    !attack::king_in_check(&scratch, side)
}

/// Walks unit steps from just after `from` towards `to`; any occupied
/// intermediate square fails the check. The endpoints themselves are not
/// inspected.
pub(crate) fn is_path_clear(b: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut cur = from;
    loop {
        cur = match cur.try_shift(step_f, step_r) {
            Some(sq) => sq,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if b.get(cur).is_some() {
            return false;
        }
    }
}

fn pawn_reaches(b: &Board, color: Color, from: Square, to: Square, df: i8, dr: i8) -> bool {
    let dir = geometry::pawn_dir(color);

    // forward pushes, onto empty squares only
    if df == 0 && b.get(to).is_none() {
        if dr == dir {
            return true;
        }
        if dr == 2 * dir && from.rank() == geometry::pawn_start_rank(color) {
            return from
                .try_shift(0, dir)
                .map_or(false, |mid| b.get(mid).is_none());
        }
        return false;
    }

    // diagonal captures, ordinary or en passant
    if df.abs() == 1 && dr == dir {
        if let Some(dst) = b.get(to) {
            return dst.color != color;
        }
        return b.ep_target() == Some(to);
    }

    false
}

pub(crate) fn rook_reaches(b: &Board, from: Square, to: Square, df: i8, dr: i8) -> bool {
    ((df == 0) != (dr == 0)) && is_path_clear(b, from, to)
}

pub(crate) fn knight_reaches(df: i8, dr: i8) -> bool {
    matches!((df.abs(), dr.abs()), (2, 1) | (1, 2))
}

pub(crate) fn bishop_reaches(b: &Board, from: Square, to: Square, df: i8, dr: i8) -> bool {
    df != 0 && df.abs() == dr.abs() && is_path_clear(b, from, to)
}

pub(crate) fn queen_reaches(b: &Board, from: Square, to: Square, df: i8, dr: i8) -> bool {
    rook_reaches(b, from, to, df, dr) || bishop_reaches(b, from, to, df, dr)
}

/// Ordinary one-step king move, castling excluded.
pub(crate) fn king_steps(df: i8, dr: i8) -> bool {
    df.abs() <= 1 && dr.abs() <= 1 && (df, dr) != (0, 0)
}
