//! SpeedChess - Bitboard Chess Engine
//!
//! A chess engine written in Rust with support for:
//! - Bitboard board representation with exact make/unmake
//! - Pseudo-legal and legal move generation, castling and queen promotion
//! - Heuristic evaluation cached by Zobrist hash
//! - Minimax search with alpha-beta pruning and capture/check extensions
//! - An interactive console game for human and CPU players

pub mod types;
pub mod error;
pub mod bitboard;
pub mod chess_move;
pub mod board;
pub mod move_generator;
pub mod zobrist;
pub mod score_cache;
pub mod evaluation;
pub mod config;
pub mod search;
pub mod console;
