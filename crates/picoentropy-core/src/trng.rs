//! TRNG collection with bounded retry and graceful degradation.
//!
//! A health-test failure on one collection attempt is recovered locally:
//! the reseed logic retries up to [`RETRY_ATTEMPTS`] times, then treats the
//! contribution as an all-zero, entropy-free block and carries on.
//! Availability wins over aborting the reseed — the oscillator source is
//! over-provisioned so it alone still meets the oversampling ratio.

use log::warn;

use crate::port::{TRNG_BLOCK_LEN, TrngBlock, TrngPort};

/// Collection attempts per requested TRNG contribution before degrading.
pub const RETRY_ATTEMPTS: u32 = 3;

/// Result of one bounded-retry TRNG collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// A block that passed the peripheral's health test.
    Collected(TrngBlock),
    /// Every attempt failed the health test; the contribution carries no
    /// entropy.
    Degraded,
}

impl CollectOutcome {
    /// The block to feed the conditioner: the collected sample, or all
    /// zeroes when degraded.
    pub fn into_block(self) -> TrngBlock {
        match self {
            Self::Collected(block) => block,
            Self::Degraded => [0u8; TRNG_BLOCK_LEN],
        }
    }
}

/// Collect one block, retrying health-test failures up to `attempts` times.
pub fn collect_with_retry<T: TrngPort + ?Sized>(port: &mut T, attempts: u32) -> CollectOutcome {
    for attempt in 1..=attempts {
        match port.collect_block() {
            Ok(block) => return CollectOutcome::Collected(block),
            Err(err) => {
                warn!("TRNG health test failed ({err}), attempt {attempt}/{attempts}");
            }
        }
    }
    warn!("TRNG contribution degraded to zero after {attempts} failed attempts");
    CollectOutcome::Degraded
}
