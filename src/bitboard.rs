//! SpeedChess - Bitboard Module
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! board (bit 0 = a1, bit 63 = h8, rank-major). All operations are pure and
//! return new values.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// 64-bit positional set over the board squares
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    /// Bitboard with a single square set
    #[inline]
    pub const fn from_square(pos: usize) -> Self {
        Bitboard(1u64 << pos)
    }

    /// Whether the square at `pos` (0-63) is set
    #[inline]
    pub const fn get(self, pos: usize) -> bool {
        (self.0 >> pos) & 1 == 1
    }

    /// Whether the square at file `x`, rank `y` (both 0-7) is set
    #[inline]
    pub const fn get_xy(self, x: usize, y: usize) -> bool {
        self.get(y * 8 + x)
    }

    #[inline]
    #[must_use]
    pub const fn set(self, pos: usize) -> Self {
        Bitboard(self.0 | (1u64 << pos))
    }

    #[inline]
    #[must_use]
    pub const fn set_xy(self, x: usize, y: usize) -> Self {
        self.set(y * 8 + x)
    }

    #[inline]
    #[must_use]
    pub const fn clear(self, pos: usize) -> Self {
        Bitboard(self.0 & !(1u64 << pos))
    }

    #[inline]
    #[must_use]
    pub const fn clear_xy(self, x: usize, y: usize) -> Self {
        self.clear(y * 8 + x)
    }

    /// Population count
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Complement of the set
    #[inline]
    #[must_use]
    pub const fn not(self) -> Self {
        Bitboard(!self.0)
    }

    /// Intersection of any number of bitboards (FULL for none)
    pub fn and_all<I: IntoIterator<Item = Bitboard>>(boards: I) -> Self {
        boards.into_iter().fold(Bitboard::FULL, |acc, bb| acc & bb)
    }

    /// Union of any number of bitboards (EMPTY for none)
    pub fn or_all<I: IntoIterator<Item = Bitboard>>(boards: I) -> Self {
        boards.into_iter().fold(Bitboard::EMPTY, |acc, bb| acc | bb)
    }

    /// Iterate over set squares from a1 upwards
    #[inline]
    pub fn squares(self) -> Squares {
        Squares(self.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Iterator over the set squares of a bitboard
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        Some(pop_lsb(&mut self.0))
    }
}

/// 8x8 dump, rank 8 first: `*X` for set squares, `* ` for empty ones
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8).rev() {
            for x in 0..8 {
                f.write_str(if self.get_xy(x, y) { "*X" } else { "* " })?;
            }
            f.write_str("*\n")?;
        }
        Ok(())
    }
}

// ============================================================================
// PRECOMPUTED ATTACK TABLES
// ============================================================================

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Squares a knight on each square attacks
pub static KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_JUMPS);

/// Squares a king on each square attacks
pub static KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);

/// Squares a pawn attacks, indexed [side][square]
pub static PAWN_ATTACKS: [[u64; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

/// For every square, the on-board targets of the (file, rank) deltas
const fn leaper_table(deltas: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0;
        while i < deltas.len() {
            let (f, r) = (file + deltas[i].0, rank + deltas[i].1);
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[sq] |= 1u64 << (r * 8 + f) as u32;
            }
            i += 1;
        }
        sq += 1;
    }

    table
}

// ============================================================================
// SLIDING PIECE ATTACKS
// ============================================================================

/// Rook attacks from a square given occupied squares (blockers included)
pub fn rook_attacks(sq: usize, occupied: u64) -> u64 {
    ray_attacks(sq, occupied, &[(0, 1), (0, -1), (1, 0), (-1, 0)])
}

/// Bishop attacks from a square given occupied squares (blockers included)
pub fn bishop_attacks(sq: usize, occupied: u64) -> u64 {
    ray_attacks(sq, occupied, &[(1, 1), (-1, 1), (1, -1), (-1, -1)])
}

fn ray_attacks(sq: usize, occupied: u64, steps: &[(i32, i32)]) -> u64 {
    let mut attacks = 0u64;

    for &(df, dr) in steps {
        let mut f = (sq % 8) as i32;
        let mut r = (sq / 8) as i32;
        loop {
            f += df;
            r += dr;
            if !(0..8).contains(&f) || !(0..8).contains(&r) {
                break;
            }
            let target = 1u64 << (r * 8 + f);
            attacks |= target;
            if target & occupied != 0 {
                break;
            }
        }
    }

    attacks
}

// ============================================================================
// BITBOARD UTILITIES
// ============================================================================

/// Extract and clear the least significant bit, returning its index
#[inline]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let idx = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    idx
}
