use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use super::hash::{SlotHash, DRAW_CODE_BOUND, RATE_TUPLE_LENGTH};
use crate::common::errors::{DrawError, Result};
use crate::common::types::{AwardRateInfo, StrategyId};

/// How an award rate is turned into whole hundredth units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRounding {
    /// Drop everything below a hundredth (0.555 -> 55)
    #[default]
    Truncate,
    /// Round half away from zero (0.555 -> 56)
    HalfUp,
}

impl UnitRounding {
    /// Number of probability units for `rate`
    ///
    /// `rate` is expected to be in [0, 1]; anything else maps to 0.
    pub fn to_units(&self, rate: Decimal) -> u32 {
        let scaled = rate * Decimal::ONE_HUNDRED;
        let units = match self {
            UnitRounding::Truncate => scaled.trunc(),
            UnitRounding::HalfUp => {
                scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
        };
        units.to_u32().unwrap_or(0)
    }
}

/// Slot table mapping hashed probability values to award ids
///
/// Immutable once built. Rebuilding a strategy produces a new table which
/// replaces the old one as a whole.
#[derive(Debug, Clone)]
pub struct RateTable {
    strategy_id: StrategyId,
    slots: Vec<Option<String>>,
    awards: Vec<AwardRateInfo>,
    hash: SlotHash,
    total_units: u32,
    collisions: u32,
}

impl RateTable {
    /// Build the table for a strategy
    ///
    /// Award `i` receives the cumulative values `cursor+1 ..= cursor+units(i)`,
    /// each hashed into its own slot.
    pub fn build(
        strategy_id: StrategyId,
        awards: &[AwardRateInfo],
        rounding: UnitRounding,
        hash: SlotHash,
    ) -> Result<Self> {
        let mut total_rate = Decimal::ZERO;
        let mut units = Vec::with_capacity(awards.len());

        for award in awards {
            if award.award_rate < Decimal::ZERO || award.award_rate > Decimal::ONE {
                return Err(DrawError::InvalidRate {
                    award_id: award.award_id.clone(),
                    rate: award.award_rate,
                });
            }
            total_rate += award.award_rate;
            units.push(rounding.to_units(award.award_rate));
        }

        if total_rate > Decimal::ONE {
            return Err(DrawError::RateSumExceeded {
                strategy_id,
                total: total_rate,
            });
        }

        let total_units: u32 = units.iter().sum();
        if total_units as usize > RATE_TUPLE_LENGTH {
            return Err(DrawError::CapacityExceeded {
                strategy_id,
                units: total_units,
                capacity: RATE_TUPLE_LENGTH,
            });
        }
        if total_units > DRAW_CODE_BOUND {
            warn!(
                strategy_id,
                total_units,
                "Probability units beyond {} can never be drawn",
                DRAW_CODE_BOUND
            );
        }

        let mut slots: Vec<Option<String>> = vec![None; RATE_TUPLE_LENGTH];
        let mut cursor: u32 = 0;
        let mut collisions: u32 = 0;
        for (award, award_units) in awards.iter().zip(units) {
            for value in (cursor + 1)..=(cursor + award_units) {
                let slot = &mut slots[hash.index(value, RATE_TUPLE_LENGTH)];
                if let Some(previous) = slot.replace(award.award_id.clone()) {
                    collisions += 1;
                    warn!(
                        strategy_id,
                        value,
                        overwritten = %previous,
                        by = %award.award_id,
                        "Rate table slot overwritten"
                    );
                }
            }
            cursor += award_units;
        }

        debug!(
            strategy_id,
            awards = awards.len(),
            total_units,
            collisions,
            "Built rate table"
        );

        Ok(Self {
            strategy_id,
            slots,
            awards: awards.to_vec(),
            hash,
            total_units,
            collisions,
        })
    }

    pub fn strategy_id(&self) -> StrategyId {
        self.strategy_id
    }

    /// Awards the table was built from, in configuration order
    pub fn awards(&self) -> &[AwardRateInfo] {
        &self.awards
    }

    /// Sum of probability units over all awards
    pub fn total_units(&self) -> u32 {
        self.total_units
    }

    pub fn hash(&self) -> SlotHash {
        self.hash
    }

    /// Slots written more than once while building; each overwrite shrinks an earlier award's share
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    /// Number of slots, filled or not
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when no award owns any slot
    pub fn has_no_awards(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Award stored at the slot `code` hashes to
    pub fn award_at(&self, code: u32) -> Option<&str> {
        self.slots[self.hash.index(code, self.slots.len())].as_deref()
    }

    /// Number of slots holding `award_id`
    pub fn occurrences(&self, award_id: &str) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.as_deref() == Some(award_id))
            .count()
    }

    /// Number of non-empty slots
    pub fn filled_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Resolve a draw code; an excluded or empty slot is a miss
    pub fn draw(&self, code: u32, excluded: &HashSet<String>) -> Option<String> {
        let award_id = self.award_at(code)?;
        if excluded.contains(award_id) {
            debug!(
                strategy_id = self.strategy_id,
                award_id, "Drawn award is excluded"
            );
            return None;
        }
        Some(award_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn awards_30_70() -> Vec<AwardRateInfo> {
        vec![
            AwardRateInfo::new("A", dec!(0.30)),
            AwardRateInfo::new("B", dec!(0.70)),
        ]
    }

    #[test]
    fn test_unit_rounding() {
        assert_eq!(UnitRounding::Truncate.to_units(dec!(0.30)), 30);
        assert_eq!(UnitRounding::Truncate.to_units(dec!(0.555)), 55);
        assert_eq!(UnitRounding::Truncate.to_units(dec!(0.009)), 0);
        assert_eq!(UnitRounding::HalfUp.to_units(dec!(0.555)), 56);
        assert_eq!(UnitRounding::HalfUp.to_units(dec!(0.554)), 55);
        assert_eq!(UnitRounding::HalfUp.to_units(dec!(0.005)), 1);
        assert_eq!(UnitRounding::Truncate.to_units(dec!(1)), 100);
    }

    #[test]
    fn test_build_occupies_units_per_award() {
        let table =
            RateTable::build(1, &awards_30_70(), UnitRounding::Truncate, SlotHash::Fibonacci)
                .unwrap();

        assert_eq!(table.slot_count(), RATE_TUPLE_LENGTH);
        assert_eq!(table.collisions(), 0);
        assert_eq!(table.total_units(), 100);
        assert_eq!(table.occurrences("A"), 30);
        assert_eq!(table.occurrences("B"), 70);
        assert_eq!(table.filled_slots(), 100);
    }

    #[test]
    fn test_fibonacci_matches_direct_counts() {
        let awards = vec![
            AwardRateInfo::new("A", dec!(0.05)),
            AwardRateInfo::new("B", dec!(0.15)),
            AwardRateInfo::new("C", dec!(0.20)),
            AwardRateInfo::new("D", dec!(0.25)),
            AwardRateInfo::new("E", dec!(0.35)),
        ];
        let fib = RateTable::build(1, &awards, UnitRounding::Truncate, SlotHash::Fibonacci).unwrap();
        let direct = RateTable::build(1, &awards, UnitRounding::Truncate, SlotHash::Direct).unwrap();

        for award in &awards {
            let expected = UnitRounding::Truncate.to_units(award.award_rate) as usize;
            assert_eq!(fib.occurrences(&award.award_id), expected);
            assert_eq!(direct.occurrences(&award.award_id), expected);
        }
        assert_eq!(fib.collisions(), 0);
        assert_eq!(direct.collisions(), 0);
    }

    #[test]
    fn test_draw_codes_follow_cumulative_order() {
        let table =
            RateTable::build(1, &awards_30_70(), UnitRounding::Truncate, SlotHash::Fibonacci)
                .unwrap();

        for code in 1..=30 {
            assert_eq!(table.award_at(code), Some("A"));
        }
        for code in 31..=100 {
            assert_eq!(table.award_at(code), Some("B"));
        }
    }

    #[test]
    fn test_slots_are_scattered() {
        let table =
            RateTable::build(1, &awards_30_70(), UnitRounding::Truncate, SlotHash::Fibonacci)
                .unwrap();

        // Code 1 lands in slot 14, code 2 in slot 85
        assert_eq!(table.slots[14].as_deref(), Some("A"));
        assert_eq!(table.slots[85].as_deref(), Some("A"));
        assert_eq!(table.slots[1], None);
    }

    #[test]
    fn test_partial_rates_leave_empty_slots() {
        let awards = vec![AwardRateInfo::new("A", dec!(0.10))];
        let table = RateTable::build(1, &awards, UnitRounding::Truncate, SlotHash::Fibonacci).unwrap();

        assert_eq!(table.filled_slots(), 10);
        assert_eq!(table.award_at(10), Some("A"));
        assert_eq!(table.award_at(11), None);
        assert_eq!(table.draw(11, &HashSet::new()), None);
    }

    #[test]
    fn test_draw_excluded_is_miss() {
        let table =
            RateTable::build(1, &awards_30_70(), UnitRounding::Truncate, SlotHash::Fibonacci)
                .unwrap();
        let excluded: HashSet<String> = ["A".to_string()].into_iter().collect();

        assert_eq!(table.draw(1, &excluded), None);
        assert_eq!(table.draw(31, &excluded), Some("B".to_string()));
    }

    #[test]
    fn test_empty_award_list() {
        let table = RateTable::build(1, &[], UnitRounding::Truncate, SlotHash::Fibonacci).unwrap();
        assert!(table.has_no_awards());
        assert_eq!(table.total_units(), 0);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let awards = vec![AwardRateInfo::new("A", dec!(-0.1))];
        let err = RateTable::build(1, &awards, UnitRounding::Truncate, SlotHash::Fibonacci)
            .unwrap_err();
        assert!(matches!(err, DrawError::InvalidRate { .. }));

        let awards = vec![AwardRateInfo::new("A", dec!(1.01))];
        let err = RateTable::build(1, &awards, UnitRounding::Truncate, SlotHash::Fibonacci)
            .unwrap_err();
        assert!(matches!(err, DrawError::InvalidRate { .. }));
    }

    #[test]
    fn test_rate_sum_above_one_rejected() {
        let awards = vec![
            AwardRateInfo::new("A", dec!(0.60)),
            AwardRateInfo::new("B", dec!(0.50)),
        ];
        let err = RateTable::build(9, &awards, UnitRounding::Truncate, SlotHash::Fibonacci)
            .unwrap_err();
        assert_eq!(
            err,
            DrawError::RateSumExceeded {
                strategy_id: 9,
                total: dec!(1.10),
            }
        );
    }

    #[test]
    fn test_capacity_exceeded_rejected() {
        // 200 awards of half a unit each round up to 200 units
        let awards: Vec<AwardRateInfo> = (0..200)
            .map(|i| AwardRateInfo::new(format!("award-{}", i), dec!(0.005)))
            .collect();

        let err = RateTable::build(3, &awards, UnitRounding::HalfUp, SlotHash::Fibonacci)
            .unwrap_err();
        assert_eq!(
            err,
            DrawError::CapacityExceeded {
                strategy_id: 3,
                units: 200,
                capacity: RATE_TUPLE_LENGTH,
            }
        );

        // Truncation drops the same awards to zero units
        let table = RateTable::build(3, &awards, UnitRounding::Truncate, SlotHash::Fibonacci)
            .unwrap();
        assert!(table.has_no_awards());
    }

    #[test]
    fn test_units_past_draw_range_build_but_cannot_be_drawn() {
        // 101 half-unit awards round up to one unit each, the tail adds 10 more
        let mut awards: Vec<AwardRateInfo> = (0..101)
            .map(|i| AwardRateInfo::new(format!("award-{}", i), dec!(0.005)))
            .collect();
        awards.push(AwardRateInfo::new("tail", dec!(0.10)));

        let table = RateTable::build(5, &awards, UnitRounding::HalfUp, SlotHash::Fibonacci).unwrap();

        assert_eq!(table.total_units(), 111);
        assert!(table.total_units() > DRAW_CODE_BOUND);
        assert_eq!(table.collisions(), 0);
        assert_eq!(table.occurrences("tail"), 10);
        assert_eq!(table.occurrences("award-100"), 1);

        // Codes stop at 100, so values 101..=111 are never reached
        let reachable: Vec<&str> = (1..=DRAW_CODE_BOUND)
            .filter_map(|code| table.award_at(code))
            .collect();
        assert_eq!(reachable.len(), 100);
        assert!(!reachable.contains(&"tail"));
        assert!(!reachable.contains(&"award-100"));
    }
}
