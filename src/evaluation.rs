//! SpeedChess - Position Evaluation Module
//!
//! This module provides static evaluation of chess positions considering:
//! - Checkmate and stalemate
//! - Material balance
//! - Pawn advancement and piece centralization
//! - Mobility and capture threats
//! - Defended pieces
//!
//! Scores are cached by Zobrist key in a bounded cache.

use crate::board::Board;
use crate::chess_move::Moveset;
use crate::move_generator::MoveGenerator;
use crate::score_cache::ScoreCache;
use crate::types::*;
use crate::zobrist::ZobristHash;

// ============================================================================
// SCORES AND BONUSES
// ============================================================================

/// Score for delivering checkmate (negated when being mated)
pub const MATE_SCORE: i32 = 1_000_000;

/// Penalty applied to either side when a stalemate is on the board. A
/// stalemate scores badly for both players rather than as a neutral draw.
pub const STALEMATE_SCORE: i32 = 500_000;

const PAWN_FORWARD_BONUS: i32 = 20;
const CENTER_POSITION_BONUS: i32 = 8;
const CENTER_MOBILITY_BONUS: i32 = 3;
const MOBILITY_BONUS: i32 = 5;
const CAPTURE_BONUS: i32 = 5;
const DEFENSE_BONUS: i32 = 10;

/// Ring distance of every square from the four center squares
const CENTER_DISTANCE: [i32; 64] = [
    3, 3, 3, 3, 3, 3, 3, 3,
    3, 2, 2, 2, 2, 2, 2, 3,
    3, 2, 1, 1, 1, 1, 2, 3,
    3, 2, 1, 0, 0, 1, 2, 3,
    3, 2, 1, 0, 0, 1, 2, 3,
    3, 2, 1, 1, 1, 1, 2, 3,
    3, 2, 2, 2, 2, 2, 2, 3,
    3, 3, 3, 3, 3, 3, 3, 3,
];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Bonus for how close a square is to the center (0 on the rim, 3 in the middle)
#[inline]
fn center_bonus(sq: usize) -> i32 {
    3 - CENTER_DISTANCE[sq]
}

/// Ranks advanced from the side's own back rank
#[inline]
fn forward_distance(sq: usize, side: Side) -> i32 {
    (rank_of(sq) as i32 - side.back_rank() as i32).abs()
}

/// Value of a capture target; kings are scaled down so that checks do not
/// dominate the score
#[inline]
fn target_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => kind.value() / 25,
        _ => kind.value(),
    }
}

fn material(board: &Board, side: Side) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let own = board.bitboard(Piece::new(kind, side)).count() as i32;
            let enemy = board.bitboard(Piece::new(kind, side.opponent())).count() as i32;
            (own - enemy) * kind.value()
        })
        .sum()
}

fn placement(board: &Board, side: Side) -> i32 {
    let mut score = 0;

    for sq in board.bitboard(Piece::new(PieceKind::Pawn, side)).squares() {
        score += forward_distance(sq, side) * PAWN_FORWARD_BONUS;
    }

    for kind in [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen] {
        for sq in board.bitboard(Piece::new(kind, side)).squares() {
            score += center_bonus(sq) * CENTER_POSITION_BONUS;
        }
    }

    score
}

/// Mobility and capture-threat bonus for one side's pseudo-legal moves
fn activity(moveset: &Moveset) -> i32 {
    let mut score = 0;

    for mv in moveset.moves() {
        score += center_bonus(mv.to) * CENTER_MOBILITY_BONUS + MOBILITY_BONUS;

        if let Some(target) = mv.captured {
            let attacker = mv.mover.kind.value();
            let victim = target_value(target.kind);
            let trade = if attacker > victim {
                1000 / (attacker - victim)
            } else {
                (victim - attacker) / 70
            };
            score += trade + CAPTURE_BONUS;
        }
    }

    score
}

/// Bonus for every friendly piece (other than the king) under protection
fn defense(moveset: &Moveset) -> i32 {
    moveset
        .defenses()
        .iter()
        .filter_map(|mv| mv.captured.map(|defended| (mv.mover, defended)))
        .filter(|(_, defended)| defended.kind != PieceKind::King)
        .map(|(defender, defended)| {
            defender.kind.value().min(defended.kind.value()) / 15 + DEFENSE_BONUS
        })
        .sum()
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Scores positions, remembering results by Zobrist key
pub struct Evaluator {
    zobrist: ZobristHash,
    cache: ScoreCache,
}

impl Evaluator {
    pub fn new(cache_capacity: usize, zobrist_seed: u64) -> Self {
        Evaluator {
            zobrist: ZobristHash::new(zobrist_seed),
            cache: ScoreCache::new(cache_capacity),
        }
    }

    /// Score the board from `side`'s perspective (positive favours `side`)
    pub fn evaluate(&mut self, board: &mut Board, side: Side) -> i32 {
        let key = self.zobrist.hash_position(board);
        if let Some(white_score) = self.cache.lookup(key) {
            return orient(white_score, side);
        }

        let own_stuck = board.legal_moves(side).is_empty();
        let enemy_stuck = board.legal_moves(side.opponent()).is_empty();

        if own_stuck || enemy_stuck {
            if own_stuck && board.in_check(side) {
                self.cache.store(key, orient(-MATE_SCORE, side));
                return -MATE_SCORE;
            }
            if enemy_stuck && board.in_check(side.opponent()) {
                self.cache.store(key, orient(MATE_SCORE, side));
                return MATE_SCORE;
            }
            // Not antisymmetric, so never cached
            return -STALEMATE_SCORE;
        }

        let score = Evaluator::static_score(board, side);
        self.cache.store(key, orient(score, side));
        score
    }

    /// Material, placement, activity and defense terms, without terminal
    /// detection or caching
    pub fn static_score(board: &mut Board, side: Side) -> i32 {
        let own_moves = MoveGenerator::generate_moves(board, side, false);
        let enemy_moves = MoveGenerator::generate_moves(board, side.opponent(), false);

        material(board, side)
            + placement(board, side) - placement(board, side.opponent())
            + activity(&own_moves) - activity(&enemy_moves)
            + defense(&own_moves) - defense(&enemy_moves)
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(crate::score_cache::DEFAULT_CAPACITY, crate::zobrist::DEFAULT_SEED)
    }
}

/// Convert between white's perspective and `side`'s perspective
#[inline]
fn orient(score: i32, side: Side) -> i32 {
    match side {
        Side::White => score,
        Side::Black => -score,
    }
}
