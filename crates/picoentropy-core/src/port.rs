//! Hardware port traits consumed by the entropy pipeline.
//!
//! The harvesters and the generator are written against these traits rather
//! than against registers, so the same code runs on RP2 silicon (see
//! [`crate::rp2`]), on a development host (see [`crate::host`]), and against
//! scripted mocks in tests.

use std::fmt;

/// Raw TRNG block length in bytes: one 192-bit entropy-history register
/// bank read (six 32-bit words).
pub const TRNG_BLOCK_LEN: usize = 24;

/// One raw, unconditioned TRNG collection.
pub type TrngBlock = [u8; TRNG_BLOCK_LEN];

/// Opaque prior power state of the ring oscillator, captured by
/// [`RoscPort::power_up`] and handed back to [`RoscPort::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerState(pub u32);

/// Ring-oscillator access.
///
/// The oscillator never fails and never blocks beyond the fixed per-bit
/// sampling latency, so `read_bit` is infallible.
pub trait RoscPort {
    /// Read one noisy bit. Only the least-significant bit of the return
    /// value is meaningful.
    fn read_bit(&mut self) -> u8;

    /// Force the oscillator on (it may be gated off to save power) and
    /// return the prior control state.
    fn power_up(&mut self) -> PowerState;

    /// Put the oscillator power control back exactly as `power_up` found it.
    fn restore(&mut self, prior: PowerState);
}

/// Dedicated TRNG peripheral access.
///
/// Absent entirely on parts without the peripheral; construct the generator
/// with [`crate::EntropyGenerator::rosc_only`] there.
pub trait TrngPort {
    /// Collect one raw block, running the peripheral's built-in
    /// repeated-output health test. Bounded latency: roughly one block of
    /// internal oscillator cycles (tens of microseconds).
    fn collect_block(&mut self) -> Result<TrngBlock, HealthFailure>;
}

/// A failed online health test on one TRNG collection attempt.
///
/// Never surfaced past the reseed logic: collection is retried a bounded
/// number of times and then degraded to a zero contribution (see
/// [`crate::collect_with_retry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthFailure {
    /// The continuous repeated-output test flagged two identical
    /// consecutive blocks — a stuck or injection-locked oscillator.
    RepeatedOutput,
}

impl fmt::Display for HealthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RepeatedOutput => write!(f, "repeated-output test failed"),
        }
    }
}

impl std::error::Error for HealthFailure {}
