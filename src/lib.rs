//! LotteryDraw Library
//!
//! O(1) prize draws for lottery strategies. Award probabilities are laid
//! out once per strategy in a Fibonacci-hashed slot table; each draw is a
//! single random code and a table lookup.

pub mod algorithm;
pub mod common;
pub mod config;
pub mod draw;

// Re-export commonly used types
pub use crate::common::errors::{DrawError, Result};
pub use crate::common::random::{FixedRandom, OsRandom, RandomSource};
pub use crate::common::types::{
    AwardRateInfo, DrawRequest, DrawResult, DrawState, StrategyDefinition, StrategyId,
    StrategyMode,
};
pub use crate::config::types::{AppConfig, EngineSettings, StrategyConfig};

// Algorithm types
pub use crate::algorithm::{
    DrawAlgorithm, EntiretyRateDraw, ExclusionPolicy, RateTable, RateTableStore,
    SharedDrawAlgorithm, SingleRateDraw, SlotHash, UnitRounding,
};
pub use crate::draw::{
    AlgorithmRegistry, DrawExec, DrawExecutor, InMemoryStrategyRepository, StrategyRepository,
};
