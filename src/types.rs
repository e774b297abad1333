//! SpeedChess - Type definitions and constants
//!
//! This module provides the core type definitions for sides, piece kinds,
//! squares and compass directions.

use std::fmt;

use crate::error::InputError;

/// File and rank names for square notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// A player. White moves up the board (towards rank 8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    /// Index into per-side arrays (white = 0, black = 1)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank of this side's back row (0 for white, 7 for black)
    #[inline]
    pub const fn back_rank(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Piece kinds, in the fixed priority order used for square lookups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 25000,
        }
    }

    /// Lowercase letter used in position strings
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece of a given kind belonging to a side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// Parse a position-string character (uppercase = white)
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some(Piece::new(kind, side))
    }

    pub fn to_fen_char(self) -> char {
        match self.side {
            Side::White => self.kind.letter().to_ascii_uppercase(),
            Side::Black => self.kind.letter(),
        }
    }

    /// Three-character cell text: white ` P `, black `(P)`
    pub fn cell_text(self) -> String {
        let letter = self.kind.letter().to_ascii_uppercase();
        match self.side {
            Side::White => format!(" {} ", letter),
            Side::Black => format!("({})", letter),
        }
    }
}

/// Compass offsets on the 0..64 square index (a1 = 0, h8 = 63)
pub struct Direction;

impl Direction {
    pub const NORTH: i32 = 8;
    pub const NORTH_EAST: i32 = 9;
    pub const EAST: i32 = 1;
    pub const SOUTH_EAST: i32 = -7;
    pub const SOUTH: i32 = -8;
    pub const SOUTH_WEST: i32 = -9;
    pub const WEST: i32 = -1;
    pub const NORTH_WEST: i32 = 7;
}

/// Get the file (0-7) of a square
#[inline]
pub const fn file_of(sq: usize) -> usize {
    sq % 8
}

/// Get the rank (0-7) of a square
#[inline]
pub const fn rank_of(sq: usize) -> usize {
    sq / 8
}

/// Convert square index (0-63) to algebraic notation (e.g., "e4")
pub fn square_name(sq: usize) -> String {
    format!(
        "{}{}",
        FILE_NAMES[file_of(sq)] as char,
        RANK_NAMES[rank_of(sq)] as char
    )
}

/// Convert a two-character "file+rank" token (e.g. `e2`) to a square index
pub fn parse_square(name: &str) -> Result<usize, InputError> {
    let chars: Vec<char> = name.trim().chars().collect();
    if chars.len() != 2 {
        return Err(InputError::SquareLength(name.to_string()));
    }

    let file = match chars[0].to_ascii_lowercase() {
        c @ 'a'..='h' => (c as usize) - ('a' as usize),
        c => return Err(InputError::BadFile(c)),
    };

    let rank = match chars[1] {
        c @ '1'..='8' => (c as usize) - ('1' as usize),
        c => return Err(InputError::BadRank(c)),
    };

    Ok(rank * 8 + file)
}
