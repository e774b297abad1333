//! SpeedChess - Zobrist Hashing
//!
//! Deterministic 64-bit fingerprints of a board: piece placement, side to
//! move and castling rights. Keys come from a seeded generator so the same
//! seed always yields the same hashes.

use rand::prelude::*;

use crate::board::Board;
use crate::types::{Piece, PieceKind, Side};

pub const DEFAULT_SEED: u64 = 12345;

pub struct ZobristHash {
    /// [side][piece kind][square]
    piece_keys: [[[u64; 64]; 6]; 2],
    side_key: u64,
    /// [side][kingside, queenside]
    castling_keys: [[u64; 2]; 2],
}

impl ZobristHash {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for side in piece_keys.iter_mut() {
            for kind in side.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        let mut castling_keys = [[0u64; 2]; 2];
        for side in castling_keys.iter_mut() {
            side[0] = rng.gen();
            side[1] = rng.gen();
        }

        ZobristHash {
            piece_keys,
            side_key,
            castling_keys,
        }
    }

    pub fn hash_position(&self, board: &Board) -> u64 {
        let mut h = 0u64;

        for side in Side::BOTH {
            for kind in PieceKind::ALL {
                for sq in board.bitboard(Piece::new(kind, side)).squares() {
                    h ^= self.piece_keys[side.index()][kind.index()][sq];
                }
            }

            if board.can_castle_kingside(side) {
                h ^= self.castling_keys[side.index()][0];
            }
            if board.can_castle_queenside(side) {
                h ^= self.castling_keys[side.index()][1];
            }
        }

        if board.side_to_move() == Side::Black {
            h ^= self.side_key;
        }

        h
    }
}

impl Default for ZobristHash {
    fn default() -> Self {
        ZobristHash::new(DEFAULT_SEED)
    }
}
