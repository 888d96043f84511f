//! Error types for the draw engine

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{StrategyId, StrategyMode};

/// Result type alias using our DrawError
pub type Result<T> = std::result::Result<T, DrawError>;

/// Main error type for rate table and draw operations
///
/// A draw that lands on nothing is not an error; see
/// [`DrawState::NoWin`](super::types::DrawState::NoWin).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// Draw requested before a rate table was built for the strategy
    #[error("Rate table not initialized for strategy {0}")]
    NotInitialized(StrategyId),

    /// No algorithm registered for the requested mode
    #[error("Strategy mode not supported: {0}")]
    UnsupportedMode(StrategyMode),

    /// Probability units do not fit in the slot table
    #[error("Strategy {strategy_id} needs {units} probability units, table capacity is {capacity}")]
    CapacityExceeded {
        strategy_id: StrategyId,
        units: u32,
        capacity: usize,
    },

    /// Award rate outside of [0, 1]
    #[error("Invalid award rate {rate} for award {award_id}")]
    InvalidRate { award_id: String, rate: Decimal },

    /// Award rates of a strategy add up to more than 1
    #[error("Award rates of strategy {strategy_id} sum to {total}, which exceeds 1")]
    RateSumExceeded { strategy_id: StrategyId, total: Decimal },

    /// Strategy unknown to the repository
    #[error("Strategy not found: {0}")]
    StrategyNotFound(StrategyId),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for DrawError {
    fn from(err: config::ConfigError) -> Self {
        DrawError::Configuration(err.to_string())
    }
}
