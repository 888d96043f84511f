//! Shared domain types for strategies, awards and draw results

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Strategy identifier as issued by the configuration collaborator
pub type StrategyId = i64;

/// Draw mode configured on a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    /// Each award is drawn against its own rate; an excluded hit is a miss
    Single,
    /// Awards are drawn against the strategy as a whole; exclusions are redistributed
    Entirety,
}

impl StrategyMode {
    /// Numeric code used by the strategy store
    pub fn code(&self) -> i32 {
        match self {
            StrategyMode::Single => 1,
            StrategyMode::Entirety => 2,
        }
    }
}

impl std::fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyMode::Single => write!(f, "single"),
            StrategyMode::Entirety => write!(f, "entirety"),
        }
    }
}

/// Award and its winning probability within a strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRateInfo {
    /// Opaque award identifier
    pub award_id: String,
    /// Probability in [0, 1]
    pub award_rate: Decimal,
}

impl AwardRateInfo {
    pub fn new(award_id: impl Into<String>, award_rate: Decimal) -> Self {
        Self {
            award_id: award_id.into(),
            award_rate,
        }
    }
}

/// Strategy as supplied by the strategy repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub strategy_id: StrategyId,
    pub mode: StrategyMode,
    /// Awards in the order their probability units are laid out
    pub awards: Vec<AwardRateInfo>,
}

/// Draw request coming from the platform layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub user_id: String,
    pub strategy_id: StrategyId,
}

impl DrawRequest {
    pub fn new(user_id: impl Into<String>, strategy_id: StrategyId) -> Self {
        Self {
            user_id: user_id.into(),
            strategy_id,
        }
    }
}

/// Outcome of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    Won,
    NoWin,
}

/// Draw result returned to the platform layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub user_id: String,
    pub strategy_id: StrategyId,
    pub state: DrawState,
    /// Winning award, absent when nothing was won
    pub award_id: Option<String>,
    pub drawn_at: DateTime<Utc>,
}

impl DrawResult {
    /// Build a result from the award an algorithm produced, if any
    pub fn from_award(request: &DrawRequest, award_id: Option<String>) -> Self {
        let state = if award_id.is_some() {
            DrawState::Won
        } else {
            DrawState::NoWin
        };

        Self {
            user_id: request.user_id.clone(),
            strategy_id: request.strategy_id,
            state,
            award_id,
            drawn_at: Utc::now(),
        }
    }

    /// Returns true if an award was won
    pub fn is_win(&self) -> bool {
        self.state == DrawState::Won
    }
}
