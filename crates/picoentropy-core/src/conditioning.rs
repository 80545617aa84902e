//! Entropy conditioning.
//!
//! **All** compression of raw harvests into seed material lives here — the
//! harvesters produce raw bytes, and this module is the single, auditable
//! gateway that turns them into something assumed fully random.
//!
//! ```text
//! Harvesters → Raw bytes → condition() (this module) → Seed
//! ```
//!
//! NIST SP 800-90B recommends the SHA hash family as an extractor and
//! states that if the entropy fed in is at least twice the number of bits
//! taken out, the output can be considered essentially fully random. The
//! ratio is the invariant; per-source round counts are platform capacity
//! tuning, owned by the caller (see [`crate::generator`]). `condition`
//! itself performs no accounting and keeps no state.

use sha2::{Digest, Sha256};

/// Generator state / seed width in bytes (one SHA-256 digest).
pub const SEED_LEN: usize = 32;

/// Conditioned seed material, also the generator's counter-state buffer.
pub type Seed = [u8; SEED_LEN];

/// Number of oscillator rounds of `SEED_LEN` bytes hashed per reseed on
/// parts where the ring oscillator is the only source. Two rounds already
/// meet the 2:1 raw-to-output minimum; the margin covers the oscillator's
/// unknown and temperature-dependent bias.
pub const ROSC_SAFETY_MARGIN: usize = 4;

/// Compress raw harvests into one seed.
///
/// A single SHA-256 over the concatenation of all harvests, in the fixed
/// source order supplied by the caller (TRNG blocks first, then oscillator
/// rounds). Callers must supply at least 2 raw bits per output bit, summed
/// across all harvests; this function does not check the ratio.
pub fn condition(harvests: &[&[u8]]) -> Seed {
    let mut hasher = Sha256::new();
    for harvest in harvests {
        hasher.update(harvest);
    }
    hasher.finalize().into()
}

/// Quick Shannon entropy in bits/byte for a byte slice.
///
/// Diagnostic only — used by the CLI bench command, never by the pipeline.
pub fn quick_shannon(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }
    let n = data.len() as f64;
    let mut h = 0.0;
    for &c in &counts {
        if c > 0 {
            let p = c as f64 / n;
            h -= p * p.log2();
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn condition_matches_hash_of_concatenation() {
        let a = [0x11u8; 24];
        let b = [0x22u8; 24];
        let seed = condition(&[&a, &b]);

        let mut h = Sha256::new();
        h.update(a);
        h.update(b);
        let expected: Seed = h.finalize().into();
        assert_eq!(seed, expected);
    }

    #[test]
    fn condition_is_deterministic() {
        let raw = [0xA5u8; 96];
        assert_eq!(condition(&[&raw]), condition(&[&raw]));
    }

    #[test]
    fn condition_is_order_sensitive() {
        let a = [1u8; 24];
        let b = [2u8; 24];
        assert_ne!(condition(&[&a, &b]), condition(&[&b, &a]));
    }

    #[test]
    fn condition_output_width() {
        let seed = condition(&[&[0u8; 8]]);
        assert_eq!(seed.len(), SEED_LEN);
    }

    #[test]
    fn split_points_do_not_matter() {
        // Only the concatenation is hashed, not harvest boundaries.
        let raw = [0x3Cu8; 48];
        assert_eq!(condition(&[&raw]), condition(&[&raw[..20], &raw[20..]]));
    }

    #[test]
    fn quick_shannon_constant_data() {
        assert_eq!(quick_shannon(&[7u8; 1024]), 0.0);
    }

    #[test]
    fn quick_shannon_uniform_data() {
        let data: Vec<u8> = (0..=255).collect();
        assert!((quick_shannon(&data) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn quick_shannon_empty() {
        assert_eq!(quick_shannon(&[]), 0.0);
    }
}
