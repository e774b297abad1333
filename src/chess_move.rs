//! SpeedChess - Moves and Movesets
//!
//! A `Move` carries every side effect the board needs to apply it, so
//! making and unmaking never re-derive castling or promotion details.

use std::fmt;

use crate::types::{square_name, Piece, PieceKind};

/// Represents one ply and its side-effect flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub mover: Piece,
    pub from: usize,
    pub to: usize,
    /// Piece on the destination square. For defending moves this is the
    /// friendly piece being protected.
    pub captured: Option<Piece>,
    pub is_kingside_castle: bool,
    pub is_queenside_castle: bool,
    pub disables_kingside_castle: bool,
    pub disables_queenside_castle: bool,
    pub promotes_to: Option<PieceKind>,
    pub is_defending_own_piece: bool,
}

impl Move {
    /// Create a quiet move
    pub fn new(mover: Piece, from: usize, to: usize) -> Self {
        Move {
            mover,
            from,
            to,
            captured: None,
            is_kingside_castle: false,
            is_queenside_castle: false,
            disables_kingside_castle: false,
            disables_queenside_castle: false,
            promotes_to: None,
            is_defending_own_piece: false,
        }
    }

    /// Create a move onto an occupied square: a capture if the occupant is
    /// an enemy, a defense otherwise
    pub fn onto(mover: Piece, from: usize, to: usize, occupant: Piece) -> Self {
        Move {
            captured: Some(occupant),
            is_defending_own_piece: occupant.side == mover.side,
            ..Move::new(mover, from, to)
        }
    }

    /// Whether this move removes an enemy piece
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some() && !self.is_defending_own_piece
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.is_kingside_castle || self.is_queenside_castle
    }
}

/// Displayed as `e2 -> e4`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", square_name(self.from), square_name(self.to))
    }
}

/// Moves generated for one side from one position
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Moveset {
    moves: Vec<Move>,
    defenses: Vec<Move>,
    captures: usize,
}

impl Moveset {
    pub fn new() -> Self {
        Moveset::default()
    }

    /// Add a move, routing defending moves to `defenses` and keeping
    /// captures ahead of quiet moves
    pub fn push(&mut self, mv: Move) {
        if mv.is_defending_own_piece {
            self.defenses.push(mv);
        } else if mv.is_capture() {
            self.moves.insert(self.captures, mv);
            self.captures += 1;
        } else {
            self.moves.push(mv);
        }
    }

    /// Playable moves, captures first
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Defending pseudo-moves; never playable
    #[inline]
    pub fn defenses(&self) -> &[Move] {
        &self.defenses
    }

    /// Whether there is no playable move
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Find the playable move going from `from` to `to`
    pub fn find(&self, from: usize, to: usize) -> Option<Move> {
        self.moves.iter().copied().find(|m| m.from == from && m.to == to)
    }
}
