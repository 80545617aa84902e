pub mod bench;
pub mod health;
pub mod stream;

use picoentropy_core::{EntropyGenerator, JitterRosc, NoTrng};

/// The host has no TRNG peripheral, so every command runs the generator
/// oscillator-only over timer jitter.
pub fn make_generator() -> EntropyGenerator<JitterRosc, NoTrng> {
    EntropyGenerator::rosc_only(JitterRosc::new())
}
