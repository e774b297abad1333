//! SpeedChess - Search Engine Module
//!
//! This module implements move selection using:
//! - Minimax in negamax form with alpha-beta pruning
//! - A fractional depth budget: captures and checking moves consume only
//!   part of a ply, so forcing lines are searched deeper
//! - Cached leaf evaluation keyed by Zobrist hash
//!
//! The board is mutated in place with make/unmake pairs; it is never copied.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::chess_move::Move;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::evaluation::Evaluator;
use crate::types::Side;

// Constants for search
pub const INFINITY: i32 = i32::MAX;

/// Outcome of a completed search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score of the best line from the searching side's perspective
    pub score: i32,
    pub nodes: u64,
}

pub struct SearchEngine {
    evaluator: Evaluator,
    config: EngineConfig,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(SearchEngine {
            evaluator: Evaluator::new(config.cache_capacity, config.zobrist_seed),
            config,
            nodes_searched: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate the board for `side` through the shared score cache
    pub fn evaluate(&mut self, board: &mut Board, side: Side) -> i32 {
        self.evaluator.evaluate(board, side)
    }

    /// Search with the configured depth budget, which was validated when
    /// the engine was built
    pub fn search(&mut self, board: &mut Board, side: Side) -> Option<SearchResult> {
        let depth = self.config.depth;
        self.run(board, side, depth)
    }

    /// Pick the best move for `side` within `depth` plies. Ok(None) means
    /// `side` has no legal move (the game is already over by checkmate or
    /// stalemate).
    pub fn search_to_depth(
        &mut self,
        board: &mut Board,
        side: Side,
        depth: f64,
    ) -> Result<Option<SearchResult>, ConfigError> {
        EngineConfig::check_depth(depth)?;
        Ok(self.run(board, side, depth))
    }

    fn run(&mut self, board: &mut Board, side: Side, depth: f64) -> Option<SearchResult> {
        let start = Instant::now();
        self.nodes_searched = 0;

        let (best_move, score) = self.negamax(board, side, side, depth, -INFINITY, INFINITY, None);

        let Some(best_move) = best_move else {
            warn!(%side, "no move available");
            return None;
        };

        info!(
            %side,
            best = %best_move,
            score,
            nodes = self.nodes_searched,
            cached = self.evaluator.cache().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );

        Some(SearchResult {
            best_move,
            score,
            nodes: self.nodes_searched,
        })
    }

    /// Minimax over `turn`'s legal moves, scored for `max_side`.
    ///
    /// `root` is the move played at the root on the way to this node; it is
    /// returned unchanged with the score so the caller learns which root move
    /// a line belongs to. At the root itself it is None.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        max_side: Side,
        turn: Side,
        depth: f64,
        mut alpha: i32,
        mut beta: i32,
        root: Option<Move>,
    ) -> (Option<Move>, i32) {
        self.nodes_searched += 1;

        if depth <= 0.0 {
            return (root, self.evaluator.evaluate(board, max_side));
        }

        let moves = board.legal_moves(turn);
        if moves.is_empty() {
            return (root, self.evaluator.evaluate(board, max_side));
        }
        if root.is_some() && board.legal_moves(turn.opponent()).is_empty() {
            return (root, self.evaluator.evaluate(board, max_side));
        }

        let maximizing = turn == max_side;
        let mut best: (Option<Move>, i32) = (None, if maximizing { -INFINITY } else { INFINITY });

        for mv in moves.moves() {
            board.make_move(mv);

            let forcing = mv.is_capture() || board.in_check(turn.opponent());
            let cost = if forcing { self.config.extension_cost } else { 1.0 };

            let (line, score) = self.negamax(
                board,
                max_side,
                turn.opponent(),
                depth - cost,
                alpha,
                beta,
                Some(root.unwrap_or(*mv)),
            );

            board.unmake_move();

            if root.is_none() {
                debug!(candidate = %mv, score, "root move scored");
            }

            if maximizing {
                if best.0.is_none() || score > best.1 {
                    best = (line, score);
                }
                alpha = alpha.max(score);
            } else {
                if best.0.is_none() || score < best.1 {
                    best = (line, score);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine {
            evaluator: Evaluator::default(),
            config: EngineConfig::default(),
            nodes_searched: 0,
        }
    }
}
