use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::algorithm::{
    DrawAlgorithm, EntiretyRateDraw, RateTableStore, SharedDrawAlgorithm, SingleRateDraw,
};
use crate::common::errors::{DrawError, Result};
use crate::common::random::{OsRandom, RandomSource};
use crate::common::types::StrategyMode;
use crate::config::types::EngineSettings;

/// Strategy mode to draw algorithm mapping
///
/// Built once before draw traffic starts and never mutated afterwards, so
/// lookups need no locking. Share it behind an `Arc`.
pub struct AlgorithmRegistry {
    algorithms: HashMap<StrategyMode, SharedDrawAlgorithm>,
}

impl AlgorithmRegistry {
    /// Register each algorithm under the mode it reports
    ///
    /// A later algorithm for an already registered mode replaces the earlier one.
    pub fn new(algorithms: impl IntoIterator<Item = SharedDrawAlgorithm>) -> Self {
        let mut map: HashMap<StrategyMode, SharedDrawAlgorithm> = HashMap::new();
        for algorithm in algorithms {
            let mode = algorithm.mode();
            if map.insert(mode, algorithm).is_some() {
                warn!(%mode, "Draw algorithm registered twice, keeping the last one");
            }
        }

        info!(modes = map.len(), "Draw algorithm registry ready");
        Self { algorithms: map }
    }

    /// Standard single and entirety algorithms drawing from the OS CSPRNG
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::with_random(settings, Arc::new(OsRandom))
    }

    /// Standard single and entirety algorithms sharing one random source
    pub fn with_random(settings: &EngineSettings, random: Arc<dyn RandomSource>) -> Self {
        let single: SharedDrawAlgorithm = Arc::new(SingleRateDraw::new(
            RateTableStore::new(settings.unit_rounding, settings.slot_hash),
            Arc::clone(&random),
        ));
        let entirety: SharedDrawAlgorithm = Arc::new(EntiretyRateDraw::new(
            RateTableStore::new(settings.unit_rounding, settings.slot_hash),
            random,
            settings.entirety_exclusion,
        ));

        Self::new([single, entirety])
    }

    /// Algorithm serving `mode`
    pub fn get(&self, mode: StrategyMode) -> Result<SharedDrawAlgorithm> {
        self.algorithms
            .get(&mode)
            .cloned()
            .ok_or(DrawError::UnsupportedMode(mode))
    }

    /// Registered modes, in code order
    pub fn modes(&self) -> Vec<StrategyMode> {
        let mut modes: Vec<StrategyMode> = self.algorithms.keys().copied().collect();
        modes.sort_by_key(|mode| mode.code());
        modes
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}
