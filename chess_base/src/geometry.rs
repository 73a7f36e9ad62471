use crate::types::{Color, Rank};

/// Forward direction of `c`'s pawns, in rank-index space.
pub const fn pawn_dir(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub const fn pawn_start_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn promotion_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank of the square passed over by a double step of `c`'s pawn. This is
/// where the en-passant target lands right after the double step.
pub const fn ep_target_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R3,
        Color::Black => Rank::R6,
    }
}

/// Rank of the pawn captured en passant, keyed on the *capturer's* color.
///
/// The fixed offset is valid only because the en-passant window lasts a
/// single ply: the victim is still standing right behind the target square.
pub const fn ep_victim_rank(capturer: Color) -> Rank {
    match capturer {
        Color::White => Rank::R5,
        Color::Black => Rank::R4,
    }
}
