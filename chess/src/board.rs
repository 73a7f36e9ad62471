//! Board and related things

use lynxchess_base::types::{Color, File, Piece, PieceKind, Rank, Square};

use std::fmt;

/// The complete game state: piece placement, side to move and the
/// en-passant target square.
///
/// `Board` is a pure data container. It performs no rule checking of its
/// own; legality lives in [`rules`](crate::rules) and mutation discipline in
/// [`Game`](crate::game::Game). The setters exist so that tests, benches and
/// front ends can build arbitrary positions programmatically.
///
/// # Example
///
/// ```
/// # use lynxchess::{Board, Color, File, Piece, PieceKind, Rank};
/// #
/// let mut board = Board::empty();
/// board.put2(File::B, Rank::R2, Some(Piece::new(Color::White, PieceKind::King)));
/// board.put2(File::D, Rank::R5, Some(Piece::new(Color::Black, PieceKind::King)));
///
/// assert_eq!(board.king_pos(Color::White).unwrap().to_string(), "b2");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    cells: [Option<Piece>; 64],
    side: Color,
    ep_target: Option<Square>,
}

impl Board {
    /// Returns an empty board with White to move.
    pub const fn empty() -> Board {
        Board {
            cells: [None; 64],
            side: Color::White,
            ep_target: None,
        }
    }

    /// Returns a board with the standard initial position.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Some(Piece::new(Color::White, PieceKind::Pawn)));
            res.put2(file, Rank::R7, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Some(Piece::new(color, PieceKind::Rook)));
            res.put2(File::B, rank, Some(Piece::new(color, PieceKind::Knight)));
            res.put2(File::C, rank, Some(Piece::new(color, PieceKind::Bishop)));
            res.put2(File::D, rank, Some(Piece::new(color, PieceKind::Queen)));
            res.put2(File::E, rank, Some(Piece::new(color, PieceKind::King)));
            res.put2(File::F, rank, Some(Piece::new(color, PieceKind::Bishop)));
            res.put2(File::G, rank, Some(Piece::new(color, PieceKind::Knight)));
            res.put2(File::H, rank, Some(Piece::new(color, PieceKind::Rook)));
        }
        res
    }

    /// Returns the contents of the square `sq`.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`.
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.get(Square::from_parts(file, rank))
    }

    /// Puts `piece` onto the square `sq`, replacing any previous occupant.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Puts `piece` onto the square with file `file` and rank `rank`.
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, piece: Option<Piece>) {
        self.put(Square::from_parts(file, rank), piece);
    }

    /// Relocates whatever stands on `from` to `to`, unconditionally.
    ///
    /// No rule checks, no `has_moved` bookkeeping. Used by the move applier
    /// and by the legality checker's speculative simulation, nothing else.
    #[inline]
    pub fn move_piece_raw(&mut self, from: Square, to: Square) {
        self.cells[to.index()] = self.cells[from.index()].take();
    }

    /// Returns side to move.
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn set_side(&mut self, side: Color) {
        self.side = side;
    }

    /// Returns the en-passant target square, if the previous move opened one.
    ///
    /// This is the square *passed over* by a double pawn step, valid as a
    /// capture destination for exactly one reply.
    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.ep_target
    }

    #[inline]
    pub fn set_ep_target(&mut self, target: Option<Square>) {
        self.ep_target = target;
    }

    /// Returns the position of the king of color `c`, or `None` if that king
    /// is not on the board.
    pub fn king_pos(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == c && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over all squares occupied by pieces of color `c`.
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == c)
    }

    /// Wraps the board to allow pretty-printing with the given style.
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use lynxchess::{Board, PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let (bar, frame, side) = match self.style {
            PrettyStyle::Ascii => (
                '|',
                "-+--------",
                match self.board.side() {
                    Color::White => 'W',
                    Color::Black => 'B',
                },
            ),
            PrettyStyle::Utf8 => (
                '│',
                "─┼────────",
                match self.board.side() {
                    Color::White => '○',
                    Color::Black => '●',
                },
            ),
        };
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank.as_char(), bar)?;
            for file in File::iter() {
                let c = match (self.board.get2(file, rank), self.style) {
                    (Some(p), PrettyStyle::Ascii) => p.as_char(),
                    (Some(p), PrettyStyle::Utf8) => p.as_utf8_char(),
                    (None, _) => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", frame)?;
        writeln!(f, "{}{}abcdefgh", side, bar)?;
        Ok(())
    }
}
