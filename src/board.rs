//! SpeedChess - Board Representation Module
//!
//! This module owns all mutable chess state: one bitboard per side and piece
//! kind, castling rights, the side to move and the stack of applied moves.
//! It includes position-string parsing and formatting, incremental move
//! execution/undo, and check, checkmate and stalemate detection.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::chess_move::{Move, Moveset};
use crate::error::{FenError, InputError};
use crate::move_generator::MoveGenerator;
use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Chess board state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Piece bitboards indexed by [side][piece kind]
    pieces: [[Bitboard; 6]; 2],
    /// Castling rights indexed by side
    castle_kingside: [bool; 2],
    castle_queenside: [bool; 2],
    side_to_move: Side,
    /// Applied moves, most recent last
    history: Vec<Move>,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for side in Side::BOTH {
            let back = side.back_rank();
            let pawn_rank = match side {
                Side::White => 1,
                Side::Black => 6,
            };
            for (x, kind) in back_row.iter().enumerate() {
                board.put(Piece::new(*kind, side), back * 8 + x);
                board.put(Piece::new(PieceKind::Pawn, side), pawn_rank * 8 + x);
            }
        }

        board.castle_kingside = [true, true];
        board.castle_queenside = [true, true];
        board
    }

    /// Board with no pieces, no castling rights and white to move
    fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            castle_kingside: [false, false],
            castle_queenside: [false, false],
            side_to_move: Side::White,
            history: Vec::new(),
        }
    }

    /// Create a board from a position string.
    ///
    /// Reads piece placement (rank 8 first), the side to move and castling
    /// availability. Any further fields are accepted and ignored. Missing
    /// side and castling fields default to white and no rights.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let Some(placement) = parts.first() else {
            return Err(FenError::Empty);
        };

        let mut board = Board::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::BadPiece(c))?;
                    if file < 8 {
                        board.put(piece, rank * 8 + file);
                    }
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank + 1, files: file });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank + 1, files: file });
            }
        }

        if let Some(token) = parts.get(1) {
            board.side_to_move = match *token {
                "w" => Side::White,
                "b" => Side::Black,
                other => return Err(FenError::BadSide(other.to_string())),
            };
        }

        if let Some(token) = parts.get(2) {
            if *token != "-" {
                for c in token.chars() {
                    match c {
                        'K' => board.castle_kingside[0] = true,
                        'Q' => board.castle_queenside[0] = true,
                        'k' => board.castle_kingside[1] = true,
                        'q' => board.castle_queenside[1] = true,
                        other => return Err(FenError::BadCastling(other)),
                    }
                }
            }
        }

        Ok(board)
    }

    /// Generate a position string (placement, side, castling; no en passant
    /// square and zeroed clocks)
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.piece_at(rank * 8 + file) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Side::White => 'w',
            Side::Black => 'b',
        });

        fen.push(' ');
        let rights_start = fen.len();
        if self.castle_kingside[0] {
            fen.push('K');
        }
        if self.castle_queenside[0] {
            fen.push('Q');
        }
        if self.castle_kingside[1] {
            fen.push('k');
        }
        if self.castle_queenside[1] {
            fen.push('q');
        }
        if fen.len() == rights_start {
            fen.push('-');
        }

        fen.push_str(" - 0 1");
        fen
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Bitboard of one piece kind for one side
    #[inline]
    pub fn bitboard(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.side.index()][piece.kind.index()]
    }

    /// Union of all six piece bitboards for a side
    pub fn pieces(&self, side: Side) -> Bitboard {
        Bitboard::or_all(self.pieces[side.index()])
    }

    /// Squares occupied by either side
    pub fn occupied(&self) -> Bitboard {
        self.pieces(Side::White) | self.pieces(Side::Black)
    }

    /// Complement of all occupied squares
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Piece standing on a square, scanning pawn, rook, knight, bishop,
    /// queen, king with white before black for each kind
    pub fn piece_at(&self, sq: usize) -> Option<Piece> {
        for kind in PieceKind::ALL {
            for side in Side::BOTH {
                if self.pieces[side.index()][kind.index()].get(sq) {
                    return Some(Piece::new(kind, side));
                }
            }
        }
        None
    }

    /// Piece at file `x`, rank `y`
    pub fn piece_at_xy(&self, x: usize, y: usize) -> Option<Piece> {
        self.piece_at(y * 8 + x)
    }

    pub fn king_square(&self, side: Side) -> Option<usize> {
        self.bitboard(Piece::new(PieceKind::King, side)).squares().next()
    }

    #[inline]
    pub fn can_castle_kingside(&self, side: Side) -> bool {
        self.castle_kingside[side.index()]
    }

    #[inline]
    pub fn can_castle_queenside(&self, side: Side) -> bool {
        self.castle_queenside[side.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Applied moves, oldest first
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Total number of pieces on the board
    pub fn piece_count(&self) -> u32 {
        self.occupied().count()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    fn put(&mut self, piece: Piece, sq: usize) {
        let bb = &mut self.pieces[piece.side.index()][piece.kind.index()];
        *bb = bb.set(sq);
    }

    fn remove(&mut self, piece: Piece, sq: usize) {
        let bb = &mut self.pieces[piece.side.index()][piece.kind.index()];
        assert!(bb.get(sq), "no {:?} on {} to remove", piece, square_name(sq));
        *bb = bb.clear(sq);
    }

    fn castle_rook_squares(side: Side, kingside: bool) -> (usize, usize) {
        let base = side.back_rank() * 8;
        if kingside {
            (base + 7, base + 5)
        } else {
            (base, base + 3)
        }
    }

    /// Apply a move. All side effects come from the move's precomputed
    /// flags; the board does not re-derive them.
    pub fn make_move(&mut self, mv: &Move) {
        debug_assert!(!mv.is_defending_own_piece, "defending moves are not playable");

        self.history.push(*mv);
        let side = mv.mover.side;

        self.remove(mv.mover, mv.from);
        self.put(mv.mover, mv.to);

        if let Some(captured) = mv.captured {
            self.remove(captured, mv.to);
        }

        if mv.is_castle() {
            let rook = Piece::new(PieceKind::Rook, side);
            let (home, target) = Board::castle_rook_squares(side, mv.is_kingside_castle);
            self.remove(rook, home);
            self.put(rook, target);
        }

        if mv.disables_kingside_castle {
            self.castle_kingside[side.index()] = false;
        }
        if mv.disables_queenside_castle {
            self.castle_queenside[side.index()] = false;
        }

        if let Some(kind) = mv.promotes_to {
            self.remove(mv.mover, mv.to);
            self.put(Piece::new(kind, side), mv.to);
        }

        self.side_to_move = self.side_to_move.opponent();
    }

    /// Undo the most recent move, returning it.
    ///
    /// # Panics
    ///
    /// Panics if no move has been made; that is a caller bug.
    pub fn unmake_move(&mut self) -> Move {
        let Some(mv) = self.history.pop() else {
            panic!("unmake_move called with an empty move history");
        };
        let side = mv.mover.side;

        self.side_to_move = self.side_to_move.opponent();

        if let Some(kind) = mv.promotes_to {
            self.remove(Piece::new(kind, side), mv.to);
            self.put(mv.mover, mv.to);
        }

        if mv.disables_queenside_castle {
            self.castle_queenside[side.index()] = true;
        }
        if mv.disables_kingside_castle {
            self.castle_kingside[side.index()] = true;
        }

        if mv.is_castle() {
            let rook = Piece::new(PieceKind::Rook, side);
            let (home, target) = Board::castle_rook_squares(side, mv.is_kingside_castle);
            self.remove(rook, target);
            self.put(rook, home);
        }

        if let Some(captured) = mv.captured {
            self.put(captured, mv.to);
        }

        self.remove(mv.mover, mv.to);
        self.put(mv.mover, mv.from);

        mv
    }

    // ========================================================================
    // GAME STATUS
    // ========================================================================

    /// Whether `side`'s king could be captured by an enemy pseudo-legal move
    pub fn in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(king_sq) => MoveGenerator::is_square_attacked(self, king_sq, side.opponent()),
            None => false,
        }
    }

    /// Legal moves for a side
    pub fn legal_moves(&mut self, side: Side) -> Moveset {
        MoveGenerator::generate_moves(self, side, true)
    }

    pub fn is_checkmate(&mut self, side: Side) -> bool {
        self.in_check(side) && self.legal_moves(side).is_empty()
    }

    pub fn is_stalemate(&mut self, side: Side) -> bool {
        !self.in_check(side) && self.legal_moves(side).is_empty()
    }

    /// Look up the legal move of the side to move going from `from` to `to`
    pub fn find_legal_move(&mut self, from: usize, to: usize) -> Result<Move, InputError> {
        let side = self.side_to_move;
        self.legal_moves(side)
            .find(from, to)
            .ok_or_else(|| InputError::NoSuchMove {
                from: square_name(from),
                to: square_name(to),
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

/// Bordered text board, rank 8 at the top, black pieces in parentheses
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "     A   B   C   D   E   F   G   H";
        const BORDER: &str = "  ***********************************";

        writeln!(f, "{}", FILES)?;
        writeln!(f, "{}", BORDER)?;
        for y in (0..8).rev() {
            write!(f, "{} *", y + 1)?;
            for x in 0..8 {
                let cell = match self.piece_at_xy(x, y) {
                    Some(piece) => piece.cell_text(),
                    None => "   ".to_string(),
                };
                write!(f, "|{}", cell)?;
            }
            writeln!(f, "|* {}", y + 1)?;
        }
        writeln!(f, "{}", BORDER)?;
        write!(f, "{}", FILES)
    }
}
