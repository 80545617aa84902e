//! # picoentropy-core
//!
//! Hardware entropy harvesting for RP2-class microcontrollers.
//!
//! `picoentropy-core` turns noisy, biased, low-rate physical signals — a
//! free-running ring oscillator and (on parts that have one) a dedicated
//! TRNG peripheral — into a stream indistinguishable from uniform random
//! bytes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use picoentropy_core::{EntropyGenerator, JitterRosc};
//!
//! // Host builds use the timer-jitter port; on hardware, use `rp2::MmioRosc`.
//! let mut generator = EntropyGenerator::rosc_only(JitterRosc::new());
//!
//! let mut buf = [0u8; 64];
//! assert!(generator.fill(&mut buf));
//! ```
//!
//! ## Architecture
//!
//! Sources → Conditioning (SHA-256) → Counter-mode generator → Output
//!
//! NIST SP 800-90B recommends the SHA hash family as a conditioning
//! function and states that if the amount of entropy fed in is at least
//! twice the number of bits taken out, the output can be treated as fully
//! random. The generator seeds a 32-byte state from conditioned hardware
//! noise, then uses that state as a counter input (SHA-256 as a CSPRNG),
//! re-seeding every 256 output blocks.
//!
//! Health-test failures in the TRNG are retried a bounded number of times
//! and then degraded to a zero contribution; the ring oscillator alone
//! still meets the oversampling ratio, so [`EntropyGenerator::fill`] never
//! fails from the caller's point of view.
//!
//! Hardware access goes through the [`RoscPort`] and [`TrngPort`] traits so
//! the whole pipeline runs unmodified against mock ports in tests and
//! against timer jitter on a development host.

pub mod conditioning;
pub mod generator;
pub mod host;
pub mod port;
pub mod rosc;
pub mod rp2;
pub mod trng;

pub use conditioning::{
    ROSC_SAFETY_MARGIN, SEED_LEN, Seed, condition, quick_shannon,
};
pub use generator::{EntropyGenerator, GeneratorHealth, NoTrng};
pub use host::JitterRosc;
pub use port::{HealthFailure, PowerState, RoscPort, TRNG_BLOCK_LEN, TrngBlock, TrngPort};
pub use rosc::harvest_rosc;
pub use trng::{CollectOutcome, RETRY_ATTEMPTS, collect_with_retry};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
