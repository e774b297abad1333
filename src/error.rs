//! SpeedChess - Error types
//!
//! Errors raised at the boundary of the engine: position strings, console
//! input and engine configuration. Invariant violations inside the core
//! (e.g. unmaking with an empty history) panic instead.

/// Errors from parsing a position string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Position string is empty")]
    Empty,

    #[error("Expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("Rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: usize, files: usize },

    #[error("Unknown piece character '{0}'")]
    BadPiece(char),

    #[error("Unknown side-to-move token '{0}'")]
    BadSide(String),

    #[error("Unknown castling token '{0}'")]
    BadCastling(char),
}

/// Errors from interpreting human input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Position must be the file followed by the rank, got '{0}'")]
    SquareLength(String),

    #[error("Invalid file '{0}', must be a letter between 'a' and 'h'")]
    BadFile(char),

    #[error("Invalid rank '{0}', must be a number between 1 and 8")]
    BadRank(char),

    #[error("No legal move from {from} to {to}")]
    NoSuchMove { from: String, to: String },
}

/// Errors from validating an engine configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Depth budget must be a positive finite number, got {0}")]
    Depth(f64),

    #[error("Extension cost must be in (0, 1], got {0}")]
    ExtensionCost(f64),

    #[error("Score cache capacity must be at least 1")]
    CacheCapacity,
}
