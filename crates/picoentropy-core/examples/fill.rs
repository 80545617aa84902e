//! Basic generator example.
//!
//! Builds a generator over the host jitter port, fills a buffer, and
//! prints it as hex.
//!
//! Run: `cargo run --example fill`

use picoentropy_core::EntropyGenerator;
use picoentropy_core::JitterRosc;

fn main() {
    let mut generator = EntropyGenerator::rosc_only(JitterRosc::new());

    let mut buf = [0u8; 64];
    generator.fill(&mut buf);

    print!("Random bytes (hex): ");
    for b in &buf {
        print!("{b:02x}");
    }
    println!();

    let health = generator.health();
    println!(
        "\nGenerator health: {} blocks, {} reseeds, TRNG present: {}",
        health.blocks, health.reseeds, health.trng_present
    );
}
