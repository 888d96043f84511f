//! Strategy data supplied by the platform layer

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::info;

use crate::common::errors::{DrawError, Result};
use crate::common::types::{StrategyDefinition, StrategyId};
use crate::config::types::StrategyConfig;

/// Source of strategy definitions and award eligibility
///
/// Persistence and stock tracking live behind this trait; the draw engine
/// only reads from it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StrategyRepository: Send + Sync {
    /// Strategy mode and awards
    async fn query_strategy(&self, strategy_id: StrategyId) -> Result<StrategyDefinition>;

    /// Awards that currently may not be won
    async fn query_excluded_award_ids(&self, strategy_id: StrategyId) -> Result<HashSet<String>>;
}

/// Repository holding strategies in memory
#[derive(Debug, Default)]
pub struct InMemoryStrategyRepository {
    strategies: RwLock<HashMap<StrategyId, StrategyDefinition>>,
    excluded: RwLock<HashMap<StrategyId, HashSet<String>>>,
}

impl InMemoryStrategyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from configured strategies
    pub fn from_configs(configs: &[StrategyConfig]) -> Self {
        let strategies = configs
            .iter()
            .map(|config| (config.strategy_id, config.definition()))
            .collect();
        let excluded = configs
            .iter()
            .filter(|config| !config.excluded_award_ids.is_empty())
            .map(|config| {
                (
                    config.strategy_id,
                    config.excluded_award_ids.iter().cloned().collect(),
                )
            })
            .collect();

        Self {
            strategies: RwLock::new(strategies),
            excluded: RwLock::new(excluded),
        }
    }

    /// Insert or replace a strategy definition
    ///
    /// Rate tables already built from the old definition are not touched;
    /// callers re-initialize them explicitly.
    pub async fn upsert_strategy(&self, strategy: StrategyDefinition) {
        info!(strategy_id = strategy.strategy_id, mode = %strategy.mode, "Upserting strategy");
        self.strategies
            .write()
            .await
            .insert(strategy.strategy_id, strategy);
    }

    /// Mark an award as ineligible
    pub async fn exclude_award(&self, strategy_id: StrategyId, award_id: impl Into<String>) {
        self.excluded
            .write()
            .await
            .entry(strategy_id)
            .or_default()
            .insert(award_id.into());
    }

    /// Make a previously excluded award eligible again
    pub async fn include_award(&self, strategy_id: StrategyId, award_id: &str) {
        if let Some(ids) = self.excluded.write().await.get_mut(&strategy_id) {
            ids.remove(award_id);
        }
    }

    pub async fn len(&self) -> usize {
        self.strategies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.strategies.read().await.is_empty()
    }
}

#[async_trait]
impl StrategyRepository for InMemoryStrategyRepository {
    async fn query_strategy(&self, strategy_id: StrategyId) -> Result<StrategyDefinition> {
        self.strategies
            .read()
            .await
            .get(&strategy_id)
            .cloned()
            .ok_or(DrawError::StrategyNotFound(strategy_id))
    }

    async fn query_excluded_award_ids(&self, strategy_id: StrategyId) -> Result<HashSet<String>> {
        Ok(self
            .excluded
            .read()
            .await
            .get(&strategy_id)
            .cloned()
            .unwrap_or_default())
    }
}
