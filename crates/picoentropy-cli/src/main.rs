//! CLI for picoentropy — drive the entropy pipeline from a development host.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "picoentropy")]
#[command(about = "picoentropy — hardware entropy pipeline, driven from the host jitter port")]
#[command(version = picoentropy_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream random bytes to stdout
    Stream {
        /// Number of bytes to emit (0 = unbounded)
        #[arg(long, default_value = "64")]
        bytes: usize,

        /// Output format
        #[arg(long, default_value = "hex", value_parser = ["hex", "raw"])]
        format: String,
    },

    /// Fill a buffer and print the generator's health counters
    Health {
        /// Number of bytes to generate before the report
        #[arg(long, default_value = "8192")]
        bytes: usize,
    },

    /// Generate a sample and report its Shannon entropy
    Bench {
        /// Sample size in bytes
        #[arg(long, default_value = "65536")]
        bytes: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Stream { bytes, format } => commands::stream::run(bytes, &format),
        Commands::Health { bytes } => commands::health::run(bytes),
        Commands::Bench { bytes } => commands::bench::run(bytes),
    }
}
