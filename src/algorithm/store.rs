use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::hash::SlotHash;
use super::rate_table::{RateTable, UnitRounding};
use crate::common::errors::{DrawError, Result};
use crate::common::types::{AwardRateInfo, StrategyId};

/// Published rate tables, one per strategy
///
/// A table is built off to the side and then swapped in under its key, so
/// readers only ever hold a complete `Arc<RateTable>`. Draws already in
/// flight keep the version they cloned.
#[derive(Debug, Default)]
pub struct RateTableStore {
    tables: DashMap<StrategyId, Arc<RateTable>>,
    rounding: UnitRounding,
    hash: SlotHash,
}

impl RateTableStore {
    pub fn new(rounding: UnitRounding, hash: SlotHash) -> Self {
        Self {
            tables: DashMap::new(),
            rounding,
            hash,
        }
    }

    /// Build and publish the table for `strategy_id`, replacing any previous one
    ///
    /// On error the previously published table stays in place.
    pub fn init_rate_tuple(
        &self,
        strategy_id: StrategyId,
        awards: &[AwardRateInfo],
    ) -> Result<Arc<RateTable>> {
        let table = Arc::new(RateTable::build(
            strategy_id,
            awards,
            self.rounding,
            self.hash,
        )?);

        let replaced = self.tables.insert(strategy_id, Arc::clone(&table)).is_some();
        debug!(strategy_id, replaced, "Published rate table");

        Ok(table)
    }

    /// True iff a table has been published for `strategy_id`
    pub fn is_exist_rate_tuple(&self, strategy_id: StrategyId) -> bool {
        self.tables.contains_key(&strategy_id)
    }

    /// Current table for `strategy_id`
    pub fn rate_table(&self, strategy_id: StrategyId) -> Result<Arc<RateTable>> {
        self.tables
            .get(&strategy_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(DrawError::NotInitialized(strategy_id))
    }

    /// Award list the current table was built from
    pub fn award_rates(&self, strategy_id: StrategyId) -> Option<Vec<AwardRateInfo>> {
        self.tables
            .get(&strategy_id)
            .map(|entry| entry.value().awards().to_vec())
    }

    /// Ids of all initialized strategies
    pub fn strategy_ids(&self) -> Vec<StrategyId> {
        let mut ids: Vec<StrategyId> = self.tables.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn rounding(&self) -> UnitRounding {
        self.rounding
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
