//! link-sim: command-line driver for the link-layer transmission simulator.
//!
//! Resolves the configuration, runs one transmission through the core and
//! prints each stage, the signal trace and the metrics.

mod config;
mod input_gen;
mod waveform;

use config::{print_help, Command, Config};
use link_sim_core::metrics::TransmissionMetrics;
use link_sim_core::{simulate, Transmission};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_logging(config.verbose);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "simulation failed");
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Install a stderr subscriber; RUST_LOG wins over the `--verbose` default.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one transmission. Returns whether the message arrived intact.
fn run(config: &Config) -> link_sim_core::Result<bool> {
    if config.print_config {
        config.print();
    }

    let text = config
        .text
        .clone()
        .unwrap_or_else(|| input_gen::generate_sample_text(config.seed, config.sample_len));

    info!(seed = config.seed, chars = text.chars().count(), "starting transmission");

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let started = Instant::now();
    let tx = simulate(&text, &config.simulation, &mut rng)?;
    let elapsed = started.elapsed();

    print_stages(&text, &tx, config);

    let metrics = TransmissionMetrics::from_transmission(&text, &tx, elapsed);
    if config.print_metrics {
        metrics.print_summary();
    }
    metrics.print_result();

    Ok(metrics.text_intact)
}

fn print_stages(text: &str, tx: &Transmission, config: &Config) {
    let sim = &config.simulation;

    println!("=== Process ===");
    println!("Input text:    {:?}", text);
    println!("Binary:        {}", tx.source_bits);
    if sim.block_code {
        println!("Block coded:   {}", tx.encoded);
    }
    if let Some(flip) = &tx.flip {
        println!("Received:      {}", tx.received);
        println!("               {}^ bit {} flipped", " ".repeat(flip.flipped_index), flip.flipped_index);
    }
    for (block, outcome) in tx.blocks_with_errors() {
        match outcome.error_position() {
            Some(position) => println!("Block {block}: corrected bit at position {position}"),
            None => println!("Block {block}: error detected, not correctable"),
        }
    }
    println!("Output binary: {}", tx.output_bits);
    println!("Output text:   {:?}", tx.output_text);
    println!();

    println!(
        "=== Signal ({}, {} bits) ===",
        sim.encoding,
        sim.signal_source.name()
    );
    print!(
        "{}",
        waveform::render(
            &tx.signal,
            tx.signal_bits(sim.signal_source),
            sim.encoding.samples_per_bit()
        )
    );
}
