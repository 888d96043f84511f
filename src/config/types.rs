//! Configuration types

use serde::{Deserialize, Serialize};

use crate::algorithm::{ExclusionPolicy, SlotHash, UnitRounding};
use crate::common::types::{AwardRateInfo, StrategyDefinition, StrategyId, StrategyMode};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rate table and algorithm settings
    #[serde(default)]
    pub engine: EngineSettings,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
    /// Strategies served by the in-memory repository
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl AppConfig {
    /// Look up a configured strategy
    pub fn strategy(&self, strategy_id: StrategyId) -> Option<&StrategyConfig> {
        self.strategies
            .iter()
            .find(|strategy| strategy.strategy_id == strategy_id)
    }
}

/// Rate table and algorithm settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Conversion of rates to hundredth units
    #[serde(default)]
    pub unit_rounding: UnitRounding,
    /// Slot hashing; `direct` is meant for diagnostics
    #[serde(default)]
    pub slot_hash: SlotHash,
    /// Exclusion handling of the entirety draw
    #[serde(default)]
    pub entirety_exclusion: ExclusionPolicy,
}

/// A strategy as written in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub strategy_id: StrategyId,
    pub mode: StrategyMode,
    #[serde(default)]
    pub awards: Vec<AwardRateInfo>,
    /// Awards that start out ineligible (e.g. no stock)
    #[serde(default)]
    pub excluded_award_ids: Vec<String>,
}

impl StrategyConfig {
    pub fn definition(&self) -> StrategyDefinition {
        StrategyDefinition {
            strategy_id: self.strategy_id,
            mode: self.mode,
            awards: self.awards.clone(),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
