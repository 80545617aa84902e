use std::io::Write;

pub fn run(n_bytes: usize, format: &str) {
    let mut generator = super::make_generator();
    let chunk_size = 4096usize;
    let mut total = 0usize;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    loop {
        if n_bytes > 0 && total >= n_bytes {
            break;
        }
        let want = if n_bytes == 0 {
            chunk_size
        } else {
            chunk_size.min(n_bytes - total)
        };

        let mut data = vec![0u8; want];
        generator.fill(&mut data);

        let write_result = match format {
            "raw" => out.write_all(&data),
            _ => {
                let hex: String = data.iter().map(|b| format!("{b:02x}")).collect();
                out.write_all(hex.as_bytes())
            }
        };

        if write_result.is_err() {
            break; // Broken pipe
        }
        let _ = out.flush();

        total += data.len();
    }

    if format != "raw" {
        println!();
    }
}
