//! Development-host oscillator port backed by timer jitter.
//!
//! On a dev machine there is no ring oscillator to read, but the beat
//! between the CPU clock and the OS timekeeping clock leaks the same kind
//! of low-rate physical noise. [`JitterRosc`] samples it so the full
//! pipeline, the CLI, and the examples run unmodified off real hardware
//! noise without an RP2 board. Not a substitute for the silicon sources in
//! production.

use std::time::Instant;

use crate::port::{PowerState, RoscPort};

/// High-resolution timestamp in nanoseconds relative to a process-local
/// epoch.
fn monotonic_nanos() -> u64 {
    use std::sync::OnceLock;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}

/// [`RoscPort`] fed by scheduler and clock-domain jitter.
///
/// Each bit folds a fresh timestamp into a running accumulator and takes
/// the low bit; a data-dependent busy spin between samples decorrelates
/// consecutive reads. Power control is modeled as a plain flag.
pub struct JitterRosc {
    accumulator: u64,
    powered: bool,
}

impl JitterRosc {
    pub fn new() -> Self {
        Self {
            accumulator: monotonic_nanos(),
            powered: false,
        }
    }
}

impl Default for JitterRosc {
    fn default() -> Self {
        Self::new()
    }
}

impl RoscPort for JitterRosc {
    fn read_bit(&mut self) -> u8 {
        let now = monotonic_nanos();
        for _ in 0..(now & 0x1f) {
            std::hint::spin_loop();
        }
        self.accumulator = self
            .accumulator
            .wrapping_mul(6364136223846793005)
            .wrapping_add(now);
        let folded = self.accumulator ^ (self.accumulator >> 17) ^ (self.accumulator >> 43);
        (folded & 1) as u8
    }

    fn power_up(&mut self) -> PowerState {
        let prior = PowerState(self.powered as u32);
        self.powered = true;
        prior
    }

    fn restore(&mut self, prior: PowerState) {
        self.powered = prior.0 != 0;
    }
}
