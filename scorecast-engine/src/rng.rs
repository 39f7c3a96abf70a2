//! One-shot draws from the C runtime's reference `rand()`.
//!
//! The scoring machine reseeds with the current Unix time and takes a single
//! value, so each second is an independent draw:
//!   srand(seed);          // state = seed mod 2^32
//!   state = state * 1103515245 + 12345;
//!   value = (state >> 16) & 0x7FFF;

use crate::constants::{LCG_INCREMENT, LCG_MULTIPLIER, LCG_OUTPUT_MASK, LCG_OUTPUT_SHIFT};

/// Result of a single generator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    /// Value returned by `rand()`, always in `0..=0x7FFF`.
    pub value: u32,
    /// Internal state after the step.
    pub next_state: u32,
}

/// Seed the generator and take exactly one step.
///
/// Seeds wider than 32 bits are truncated the way `srand(unsigned)` truncates
/// them, so `generate(1 << 32) == generate(0)`.
#[must_use]
pub const fn generate(seed: u64) -> Draw {
    let state = seed_state(seed);
    let next_state = state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT);
    Draw {
        value: (next_state >> LCG_OUTPUT_SHIFT) & LCG_OUTPUT_MASK,
        next_state,
    }
}

/// Reduce a seed to the generator's 32-bit state width.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn seed_state(seed: u64) -> u32 {
    (seed & 0xFFFF_FFFF) as u32
}
