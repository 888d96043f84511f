use std::collections::HashSet;
use std::sync::Arc;

use super::store::RateTableStore;
use crate::common::errors::Result;
use crate::common::types::{AwardRateInfo, StrategyId, StrategyMode};

/// Core draw algorithm trait
///
/// Every algorithm owns a [`RateTableStore`]; table lifecycle
/// (`init_rate_tuple`, `is_exist_rate_tuple`) is shared through the
/// provided methods and only `random_draw` differs between variants.
///
/// # Implementation Notes
///
/// - `random_draw` runs on the hot path: no blocking I/O, no locks held
///   across the draw
/// - Missing tables are an error (`NotInitialized`), a miss is `Ok(None)`
pub trait DrawAlgorithm: Send + Sync {
    /// Mode this algorithm serves in the registry
    fn mode(&self) -> StrategyMode;

    /// Tables owned by this algorithm
    fn rate_tables(&self) -> &RateTableStore;

    /// Build (or rebuild) the rate table for a strategy
    fn init_rate_tuple(&self, strategy_id: StrategyId, awards: &[AwardRateInfo]) -> Result<()> {
        self.rate_tables()
            .init_rate_tuple(strategy_id, awards)
            .map(|_| ())
    }

    /// True iff a rate table exists for the strategy
    fn is_exist_rate_tuple(&self, strategy_id: StrategyId) -> bool {
        self.rate_tables().is_exist_rate_tuple(strategy_id)
    }

    /// Draw an award for the strategy
    ///
    /// # Arguments
    /// * `strategy_id` - Strategy whose table is drawn from
    /// * `excluded` - Award ids that may not be won (e.g. out of stock)
    ///
    /// # Returns
    /// * `Ok(Some(award_id))` - Award won
    /// * `Ok(None)` - No win
    fn random_draw(
        &self,
        strategy_id: StrategyId,
        excluded: &HashSet<String>,
    ) -> Result<Option<String>>;
}

/// Shared algorithm handle for dynamic dispatch
pub type SharedDrawAlgorithm = Arc<dyn DrawAlgorithm>;
