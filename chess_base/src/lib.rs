//! # Base types for lynxchess
//!
//! This is an auxiliary crate for `lynxchess`, containing the vocabulary of the
//! game: files, ranks, squares, colors, pieces and board geometry constants.
//!
//! Normally you don't want to use this crate directly. Use `lynxchess` instead.

pub mod geometry;
pub mod types;

pub use types::{Color, File, Piece, PieceKind, Promotion, Rank, Square};
