//! Ring-oscillator harvester.

use crate::port::RoscPort;

/// Fill `out` with raw bytes from the ring oscillator, one bit per port
/// read.
///
/// Each output byte accumulates nine reads: the first seeds the byte and is
/// shifted out by the eight shift-XOR rounds that follow, so every output
/// bit mixes more than one raw sample. This whitens gross correlation
/// between consecutive reads; it is not conditioning — the SHA-256
/// conditioner downstream owns that.
pub fn harvest_rosc<P: RoscPort + ?Sized>(port: &mut P, out: &mut [u8]) {
    for byte in out.iter_mut() {
        *byte = port.read_bit() & 1;
        for _ in 0..8 {
            *byte = (*byte << 1) ^ (port.read_bit() & 1);
        }
    }
}
