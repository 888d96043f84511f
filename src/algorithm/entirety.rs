use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::hash::DRAW_CODE_BOUND;
use super::rate_table::RateTable;
use super::store::RateTableStore;
use super::traits::DrawAlgorithm;
use crate::common::errors::Result;
use crate::common::random::{OsRandom, RandomSource};
use crate::common::types::{AwardRateInfo, StrategyId, StrategyMode};

/// What the entirety draw does with excluded awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Renormalize the remaining awards so a win is produced while any remain
    #[default]
    Redistribute,
    /// Draw against the full table; an excluded hit is a miss
    Miss,
}

/// Entirety-rate draw: awards are drawn against the strategy as a whole
///
/// Under [`ExclusionPolicy::Redistribute`] the remaining awards share the
/// whole `[1, 100]` code range in proportion to their rates. Shares are
/// rounded up to hundredths so their sum never falls short of 100.
pub struct EntiretyRateDraw {
    tables: RateTableStore,
    random: Arc<dyn RandomSource>,
    policy: ExclusionPolicy,
}

impl EntiretyRateDraw {
    pub fn new(tables: RateTableStore, random: Arc<dyn RandomSource>, policy: ExclusionPolicy) -> Self {
        Self {
            tables,
            random,
            policy,
        }
    }

    /// Draw with the OS CSPRNG
    pub fn secure(tables: RateTableStore, policy: ExclusionPolicy) -> Self {
        Self::new(tables, Arc::new(OsRandom), policy)
    }

    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    fn redistribute(&self, table: &RateTable, excluded: &HashSet<String>) -> Option<String> {
        let remaining: Vec<&AwardRateInfo> = table
            .awards()
            .iter()
            .filter(|award| award.award_rate > Decimal::ZERO && !excluded.contains(&award.award_id))
            .collect();

        match remaining.as_slice() {
            [] => None,
            [only] => Some(only.award_id.clone()),
            _ => {
                let denominator: Decimal = remaining.iter().map(|award| award.award_rate).sum();
                let code = self.random.next_code(DRAW_CODE_BOUND);

                let mut cursor: u32 = 0;
                for award in &remaining {
                    let share = (award.award_rate / denominator)
                        .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero)
                        * Decimal::ONE_HUNDRED;
                    cursor += share.to_u32().unwrap_or(0);
                    if code <= cursor {
                        return Some(award.award_id.clone());
                    }
                }
                None
            }
        }
    }
}

impl DrawAlgorithm for EntiretyRateDraw {
    fn mode(&self) -> StrategyMode {
        StrategyMode::Entirety
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

        let award = match self.policy {
            ExclusionPolicy::Redistribute => self.redistribute(&table, excluded),
            ExclusionPolicy::Miss => table.draw(self.random.next_code(DRAW_CODE_BOUND), excluded),
        };

        debug!(strategy_id, policy = ?self.policy, award = ?award, "Entirety rate draw");
        Ok(award)
    }
}
