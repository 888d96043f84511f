//! Common test utilities and fixtures

#![allow(dead_code)]

use lottery_draw::{AwardRateInfo, StrategyConfig, StrategyDefinition, StrategyId, StrategyMode};
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Strategy S1: A at 30%, B at 70%
pub fn awards_30_70() -> Vec<AwardRateInfo> {
    vec![
        AwardRateInfo::new("A", dec!(0.30)),
        AwardRateInfo::new("B", dec!(0.70)),
    ]
}

/// Five awards that leave 20% of the table empty
pub fn partial_awards() -> Vec<AwardRateInfo> {
    vec![
        AwardRateInfo::new("first", dec!(0.01)),
        AwardRateInfo::new("second", dec!(0.04)),
        AwardRateInfo::new("third", dec!(0.15)),
        AwardRateInfo::new("fourth", dec!(0.25)),
        AwardRateInfo::new("fifth", dec!(0.35)),
    ]
}

pub fn definition(
    strategy_id: StrategyId,
    mode: StrategyMode,
    awards: Vec<AwardRateInfo>,
) -> StrategyDefinition {
    StrategyDefinition {
        strategy_id,
        mode,
        awards,
    }
}

pub fn strategy_config(
    strategy_id: StrategyId,
    mode: StrategyMode,
    awards: Vec<AwardRateInfo>,
) -> StrategyConfig {
    StrategyConfig {
        strategy_id,
        mode,
        awards,
        excluded_award_ids: Vec::new(),
    }
}

pub fn excluded(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Sample configuration document
pub const SAMPLE_CONFIG: &str = r#"
    [engine]
    unit_rounding = "truncate"
    slot_hash = "fibonacci"
    entirety_exclusion = "redistribute"

    [[strategies]]
    strategy_id = 100001
    mode = "single"

    [[strategies.awards]]
    award_id = "A"
    award_rate = "0.30"

    [[strategies.awards]]
    award_id = "B"
    award_rate = "0.70"

    [[strategies]]
    strategy_id = 100002
    mode = "entirety"
    excluded_award_ids = ["gold"]

    [[strategies.awards]]
    award_id = "gold"
    award_rate = "0.10"

    [[strategies.awards]]
    award_id = "silver"
    award_rate = "0.20"

    [[strategies.awards]]
    award_id = "bronze"
    award_rate = "0.20"
"#;
