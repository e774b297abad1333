//! SpeedChess - Engine configuration

use crate::error::ConfigError;
use crate::score_cache::DEFAULT_CAPACITY;
use crate::zobrist::DEFAULT_SEED;

/// Tunables for the search engine and its evaluation cache
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Plies to search; may be fractional
    pub depth: f64,
    /// Budget consumed by a capture or checking move instead of a full ply
    pub extension_cost: f64,
    /// Maximum number of cached evaluation scores
    pub cache_capacity: usize,
    pub zobrist_seed: u64,
}

impl EngineConfig {
    /// A depth budget must be positive and finite for the search to end
    pub fn check_depth(depth: f64) -> Result<(), ConfigError> {
        if !depth.is_finite() || depth <= 0.0 {
            return Err(ConfigError::Depth(depth));
        }
        Ok(())
    }

    /// Reject settings that could keep the search from terminating
    pub fn validate(&self) -> Result<(), ConfigError> {
        EngineConfig::check_depth(self.depth)?;
        if !(self.extension_cost > 0.0 && self.extension_cost <= 1.0) {
            return Err(ConfigError::ExtensionCost(self.extension_cost));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::CacheCapacity);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 4.0,
            extension_cost: 0.2,
            cache_capacity: DEFAULT_CAPACITY,
            zobrist_seed: DEFAULT_SEED,
        }
    }
}
