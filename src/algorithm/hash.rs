//! Slot index hashing for rate tables

use serde::{Deserialize, Serialize};

/// Fibonacci hashing increment: `2^32 * (sqrt(5) - 1) / 2`
pub const HASH_INCREMENT: u32 = 0x61c8_8647;

/// Slot count of every rate table (power of two)
pub const RATE_TUPLE_LENGTH: usize = 128;

/// Draw codes are uniform in `[1, DRAW_CODE_BOUND]`; one code per hundredth of probability
pub const DRAW_CODE_BOUND: u32 = 100;

/// Maps a cumulative probability value to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotHash {
    /// Multiplicative hashing with [`HASH_INCREMENT`]
    #[default]
    Fibonacci,
    /// `value & (len - 1)`; keeps slot positions readable in diagnostics
    Direct,
}

impl SlotHash {
    /// Slot index for `value` in a table of `len` slots
    ///
    /// `len` must be a power of two.
    pub fn index(&self, value: u32, len: usize) -> usize {
        match self {
            SlotHash::Fibonacci => fibonacci_index(value, len),
            SlotHash::Direct => value as usize & (len - 1),
        }
    }
}

/// `(value * K + K) mod 2^32`, masked to the table length
///
/// Bit-identical to 32-bit signed wrapping arithmetic, so tables built here
/// match tables built by any other implementation of the same scheme.
pub fn fibonacci_index(value: u32, len: usize) -> usize {
    let hash_code = value
        .wrapping_mul(HASH_INCREMENT)
        .wrapping_add(HASH_INCREMENT);
    hash_code as usize & (len - 1)
}
