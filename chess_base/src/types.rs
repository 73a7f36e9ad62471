use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromotionParseError {
    #[error("unexpected promotion char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => panic!("file index must be between 0 and 7"),
        }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(Self::from_index)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            _ => panic!("rank index must be between 0 and 7"),
        }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..8).map(Self::from_index)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::from_index((u32::from(c) - u32::from('1')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// One of the 64 board squares, packed into a single byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    pub const fn from_index(val: usize) -> Square {
        assert!(val < 64, "square index must be between 0 and 63");
        Square(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square(((rank as u8) << 3) | file as u8)
    }

    pub const fn file(&self) -> File {
        File::from_index((self.0 & 7) as usize)
    }

    pub const fn rank(&self) -> Rank {
        Rank::from_index((self.0 >> 3) as usize)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts the square by the given file and rank deltas, or returns `None`
    /// if the result falls off the board.
    pub fn try_shift(self, delta_file: i8, delta_rank: i8) -> Option<Square> {
        let file = self.file().index() as i8 + delta_file;
        let rank = self.rank().index() as i8 + delta_rank;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Some(Square::from_parts(
            File::from_index(file as usize),
            Rank::from_index(rank as usize),
        ))
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0_u8..64_u8).map(Square)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Square({})", self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(SquareParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, rank_ch) = (bytes[0] as char, bytes[1] as char);
        Ok(Square::from_parts(
            File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(SquareParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn opposite(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub fn as_char(&self) -> char {
        match *self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A piece standing on the board.
///
/// `has_moved` becomes `true` the instant the piece completes any move
/// (including the rook relocated by castling) and is never reset. It only
/// matters for castling eligibility.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            has_moved: false,
        }
    }

    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char(),
            Color::Black => self.kind.as_char().to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Target piece for pawn promotion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Promotion {
    Queen = 0,
    Rook = 1,
    Bishop = 2,
    Knight = 3,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub const fn kind(&self) -> PieceKind {
        match *self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Promotion {
    type Err = PromotionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(PromotionParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Promotion::from_char(ch).ok_or(PromotionParseError::UnexpectedChar(ch))
    }
}
