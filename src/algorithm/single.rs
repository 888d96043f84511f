use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::hash::DRAW_CODE_BOUND;
use super::store::RateTableStore;
use super::traits::DrawAlgorithm;
use crate::common::errors::Result;
use crate::common::random::{OsRandom, RandomSource};
use crate::common::types::{StrategyId, StrategyMode};

/// Single-rate draw: each award keeps its own rate
///
/// One code in `[1, 100]` is drawn and looked up in the table. Hitting an
/// excluded award is a miss; its share is not handed to the other awards,
/// so the strategy's win rate drops as awards are excluded.
pub struct SingleRateDraw {
    tables: RateTableStore,
    random: Arc<dyn RandomSource>,
}

impl SingleRateDraw {
    pub fn new(tables: RateTableStore, random: Arc<dyn RandomSource>) -> Self {
        Self { tables, random }
    }

    /// Draw with the OS CSPRNG
    pub fn secure(tables: RateTableStore) -> Self {
        Self::new(tables, Arc::new(OsRandom))
    }
}

impl DrawAlgorithm for SingleRateDraw {
    fn mode(&self) -> StrategyMode {
        StrategyMode::Single
    }

    fn rate_tables(&self) -> &RateTableStore {
        &self.tables
    }

    fn random_draw(
        &self,
        strategy_id: StrategyId,
        excluded: &HashSet<String>,
    ) -> Result<Option<String>> {
        let table = self.tables.rate_table(strategy_id)?;
        let code = self.random.next_code(DRAW_CODE_BOUND);
        let award = table.draw(code, excluded);

        debug!(strategy_id, code, award = ?award, "Single rate draw");
        Ok(award)
    }
}
