//! Draw algorithms and the rate tables they draw from
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    INIT (rare, per strategy)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [AwardRateInfo] ──► RateTable::build                       │
//! │    - rate → hundredth units                                 │
//! │    - cumulative values 1..=units hashed into 128 slots      │
//! │    - built privately, then swapped into RateTableStore      │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HOT PATH (sync)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DrawAlgorithm.random_draw(strategy_id, excluded)           │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  code in [1, 100] ──► slot = hash(code) ──► award / miss    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`RateTable`]: 128-slot award index for one strategy
//! - [`RateTableStore`]: published tables keyed by strategy id
//! - [`DrawAlgorithm`]: draw contract shared by all modes
//! - [`SingleRateDraw`]: excluded hit is a miss
//! - [`EntiretyRateDraw`]: exclusions handled per [`ExclusionPolicy`]

mod entirety;
mod hash;
mod rate_table;
mod single;
mod store;
mod traits;

pub use hash::{fibonacci_index, SlotHash, DRAW_CODE_BOUND, HASH_INCREMENT, RATE_TUPLE_LENGTH};

pub use rate_table::{RateTable, UnitRounding};

pub use store::RateTableStore;

pub use traits::{DrawAlgorithm, SharedDrawAlgorithm};

pub use single::SingleRateDraw;

pub use entirety::{EntiretyRateDraw, ExclusionPolicy};
