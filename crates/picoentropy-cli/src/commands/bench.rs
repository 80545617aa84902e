use std::time::Instant;

use picoentropy_core::quick_shannon;

pub fn run(n_bytes: usize) {
    let mut generator = super::make_generator();
    let mut buf = vec![0u8; n_bytes];

    let t0 = Instant::now();
    generator.fill(&mut buf);
    let elapsed = t0.elapsed();

    let shannon = quick_shannon(&buf);
    let rate = n_bytes as f64 / elapsed.as_secs_f64();

    println!("Sample:          {n_bytes} bytes");
    println!("Shannon entropy: {shannon:.4} bits/byte");
    println!("Throughput:      {:.1} KB/s", rate / 1024.0);
    println!("Reseeds:         {}", generator.health().reseeds);
}
