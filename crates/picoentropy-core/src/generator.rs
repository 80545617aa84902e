//! Counter-mode generator, the public surface of the pipeline.
//!
//! The 32-byte state buffer doubles as CSPRNG seed and advancing counter:
//! its first byte is incremented on every output block, and the whole state
//! is replaced with freshly conditioned hardware noise every 256 blocks.
//! There is no separate counter field and no timer-driven reseed.

use log::debug;
use sha2::{Digest, Sha256};

use crate::conditioning::{ROSC_SAFETY_MARGIN, SEED_LEN, Seed, condition};
use crate::port::{HealthFailure, RoscPort, TRNG_BLOCK_LEN, TrngBlock, TrngPort};
use crate::rosc::harvest_rosc;
use crate::trng::{CollectOutcome, RETRY_ATTEMPTS, collect_with_retry};

/// TRNG blocks hashed per dual-source reseed.
const TRNG_ROUNDS: usize = 2;
/// Oscillator rounds (of [`TRNG_BLOCK_LEN`] bytes each) hashed per
/// dual-source reseed.
const ROSC_ROUNDS: usize = 2;

/// Placeholder TRNG port for parts without the peripheral. Uninhabited —
/// it can never be constructed, only named.
pub enum NoTrng {}

impl TrngPort for NoTrng {
    fn collect_block(&mut self) -> Result<TrngBlock, HealthFailure> {
        match *self {}
    }
}

/// Read-only snapshot of the generator's internal bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorHealth {
    /// Output blocks produced since construction.
    pub blocks: u64,
    /// Completed reseeds (the first block always triggers one).
    pub reseeds: u64,
    /// TRNG contributions degraded to zero after retry exhaustion.
    pub trng_failures: u64,
    /// Whether a TRNG peripheral is wired up.
    pub trng_present: bool,
}

/// Hardware-seeded counter-mode CSPRNG.
///
/// Not reentrant: the state buffer is mutated in place without a lock, and
/// [`fill`](Self::fill) saves and restores the oscillator power state
/// around the call — callers must serialize access.
pub struct EntropyGenerator<R: RoscPort, T: TrngPort> {
    rosc: R,
    trng: Option<T>,
    // Zero-initialized; the zero counter byte makes the first block request
    // perform the initial seeding. Lives until power loss, never torn down.
    state: Seed,
    blocks: u64,
    reseeds: u64,
    trng_failures: u64,
}

impl<R: RoscPort> EntropyGenerator<R, NoTrng> {
    /// Generator for parts without a TRNG peripheral. The oscillator
    /// contribution per reseed is raised to keep the raw-to-output ratio.
    pub fn rosc_only(rosc: R) -> Self {
        Self {
            rosc,
            trng: None,
            state: [0u8; SEED_LEN],
            blocks: 0,
            reseeds: 0,
            trng_failures: 0,
        }
    }
}

impl<R: RoscPort, T: TrngPort> EntropyGenerator<R, T> {
    /// Generator drawing on both the ring oscillator and the TRNG.
    pub fn new(rosc: R, trng: T) -> Self {
        Self {
            rosc,
            trng: Some(trng),
            state: [0u8; SEED_LEN],
            blocks: 0,
            reseeds: 0,
            trng_failures: 0,
        }
    }

    /// Fill `buf` with random bytes. Always succeeds; hardware health-test
    /// failures are absorbed internally (see [`crate::collect_with_retry`]).
    ///
    /// The oscillator may be gated off to save power; it is forced on for
    /// the duration of the call and put back exactly as found. There is no
    /// early return between the two power operations.
    pub fn fill(&mut self, buf: &mut [u8]) -> bool {
        let prior = self.rosc.power_up();
        for chunk in buf.chunks_mut(SEED_LEN) {
            let block = self.next_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.rosc.restore(prior);
        true
    }

    /// Bookkeeping snapshot.
    pub fn health(&self) -> GeneratorHealth {
        GeneratorHealth {
            blocks: self.blocks,
            reseeds: self.reseeds,
            trng_failures: self.trng_failures,
            trng_present: self.trng.is_some(),
        }
    }

    /// Produce one output block: reseed if the counter byte wrapped,
    /// advance the counter, hash the state.
    fn next_block(&mut self) -> Seed {
        if self.state[0] == 0 {
            self.reseed();
            // Restart the counter byte at zero so reseeds land every 256
            // blocks exactly, not whenever a seed byte happens to be zero.
            self.state[0] = 0;
        }
        self.state[0] = self.state[0].wrapping_add(1);
        self.blocks += 1;
        Sha256::digest(self.state).into()
    }

    /// Replace the whole state with conditioned fresh harvests.
    fn reseed(&mut self) {
        let Self {
            rosc,
            trng,
            trng_failures,
            ..
        } = self;

        self.state = match trng.as_mut() {
            // 384 bits of TRNG plus 384 bits of ROSC per 256-bit seed: a
            // 3:1 ratio, and two independent sources so a total failure of
            // one cannot zero the input.
            Some(trng) => {
                let mut trng_rounds = [[0u8; TRNG_BLOCK_LEN]; TRNG_ROUNDS];
                for round in trng_rounds.iter_mut() {
                    match collect_with_retry(trng, RETRY_ATTEMPTS) {
                        CollectOutcome::Collected(block) => *round = block,
                        CollectOutcome::Degraded => *trng_failures += 1,
                    }
                }
                let mut rosc_rounds = [[0u8; TRNG_BLOCK_LEN]; ROSC_ROUNDS];
                for round in rosc_rounds.iter_mut() {
                    harvest_rosc(rosc, round);
                }
                condition(&[
                    &trng_rounds[0],
                    &trng_rounds[1],
                    &rosc_rounds[0],
                    &rosc_rounds[1],
                ])
            }
            // Oscillator only: 2 * ROSC_SAFETY_MARGIN rounds of SEED_LEN
            // bytes, an 8:1 ratio against the unknown oscillator bias.
            None => {
                let mut rounds = [[0u8; SEED_LEN]; 2 * ROSC_SAFETY_MARGIN];
                for round in rounds.iter_mut() {
                    harvest_rosc(rosc, round);
                }
                let parts: [&[u8]; 2 * ROSC_SAFETY_MARGIN] =
                    std::array::from_fn(|i| rounds[i].as_slice());
                condition(&parts)
            }
        };
        self.reseeds += 1;
        debug!("reseeded after {} blocks", self.blocks);
    }
}
