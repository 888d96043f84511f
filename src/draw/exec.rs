use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::registry::AlgorithmRegistry;
use super::repository::StrategyRepository;
use crate::algorithm::DrawAlgorithm;
use crate::common::errors::Result;
use crate::common::types::{DrawRequest, DrawResult, StrategyDefinition, StrategyId};

/// Draw execution entry point for the platform layer
#[async_trait]
pub trait DrawExec: Send + Sync {
    /// Draw for a user on a strategy
    ///
    /// A miss comes back as `Ok` with [`DrawState::NoWin`](crate::DrawState::NoWin).
    async fn do_draw_exec(&self, request: DrawRequest) -> Result<DrawResult>;
}

/// Resolves the strategy, picks its algorithm and draws
pub struct DrawExecutor {
    registry: Arc<AlgorithmRegistry>,
    repository: Arc<dyn StrategyRepository>,
}

impl DrawExecutor {
    pub fn new(registry: Arc<AlgorithmRegistry>, repository: Arc<dyn StrategyRepository>) -> Self {
        Self {
            registry,
            repository,
        }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Rebuild the rate table of a strategy from the repository's current definition
    #[instrument(skip(self))]
    pub async fn reload_strategy(&self, strategy_id: StrategyId) -> Result<()> {
        let strategy = self.repository.query_strategy(strategy_id).await?;
        let algorithm = self.registry.get(strategy.mode)?;
        algorithm.init_rate_tuple(strategy.strategy_id, &strategy.awards)?;

        info!(mode = %strategy.mode, awards = strategy.awards.len(), "Reloaded rate table");
        Ok(())
    }

    fn check_and_init_rate_data(
        &self,
        algorithm: &dyn DrawAlgorithm,
        strategy: &StrategyDefinition,
    ) -> Result<()> {
        if algorithm.is_exist_rate_tuple(strategy.strategy_id) {
            return Ok(());
        }

        algorithm.init_rate_tuple(strategy.strategy_id, &strategy.awards)?;
        info!(
            strategy_id = strategy.strategy_id,
            mode = %strategy.mode,
            "Initialized rate table on first draw"
        );
        Ok(())
    }
}

#[async_trait]
impl DrawExec for DrawExecutor {
    #[instrument(skip(self), fields(user_id = %request.user_id, strategy_id = request.strategy_id))]
    async fn do_draw_exec(&self, request: DrawRequest) -> Result<DrawResult> {
        let strategy = self.repository.query_strategy(request.strategy_id).await?;
        let algorithm = self.registry.get(strategy.mode)?;

        self.check_and_init_rate_data(algorithm.as_ref(), &strategy)?;

        let excluded = self
            .repository
            .query_excluded_award_ids(request.strategy_id)
            .await?;
        let award_id = algorithm.random_draw(request.strategy_id, &excluded)?;

        let result = DrawResult::from_award(&request, award_id);
        debug!(
            state = ?result.state,
            award_id = ?result.award_id,
            excluded = excluded.len(),
            "Draw finished"
        );
        Ok(result)
    }
}
