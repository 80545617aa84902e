pub fn run(n_bytes: usize) {
    let mut generator = super::make_generator();
    let mut buf = vec![0u8; n_bytes];
    generator.fill(&mut buf);

    let health = generator.health();
    println!("{}", "=".repeat(48));
    println!("GENERATOR HEALTH REPORT");
    println!("{}", "=".repeat(48));
    println!("Bytes generated:   {n_bytes}");
    println!("Output blocks:     {}", health.blocks);
    println!("Reseeds:           {}", health.reseeds);
    println!(
        "TRNG:              {}",
        if health.trng_present {
            "present"
        } else {
            "absent (oscillator only)"
        }
    );
    println!("TRNG degradations: {}", health.trng_failures);
}
