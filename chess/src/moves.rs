//! Move representation.

use lynxchess_base::types::{Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a [`Move`] from coordinate notation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid string length")]
    BadLength,
    #[error("bad square: {0}")]
    Square(#[from] SquareParseError),
}

/// A proposed move: source and destination square.
///
/// A `Move` is plain data and carries no claim of legality; it is the
/// vocabulary callers use to talk to the engine. Castling is proposed as the
/// king's two-file move, en passant as the capturing pawn's diagonal step,
/// and promotion as the pawn's final advance (the piece choice is resolved
/// separately, see [`Game`](crate::game::Game)).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses coordinate notation: two concatenated squares, e.g. `e2e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = match (s.get(..2), s.get(2..)) {
            (Some(from), Some(to)) if s.len() == 4 => (from, to),
            _ => return Err(MoveParseError::BadLength),
        };
        Ok(Move::new(Square::from_str(from)?, Square::from_str(to)?))
    }
}
