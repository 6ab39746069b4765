//! Configuration for the link-sim application.
//!
//! Handles parsing command-line arguments and filling in defaults. Every
//! random choice is derived from one seed, and the seed is always printed, so
//! any run can be repeated exactly.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: with no `--text` a sample
//! message is generated from the seed.

use link_sim_core::{Error, LineEncoding, Result, SignalSource, SimulationConfig};

/// Default length of a generated sample message, in characters.
const DEFAULT_SAMPLE_LEN: usize = 24;

/// Complete configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Message ===
    /// Message to send (None = generate sample)
    pub text: Option<String>,

    /// Length of the generated sample message
    pub sample_len: usize,

    // === Simulation ===
    /// Stage switches and line-coding choice
    pub simulation: SimulationConfig,

    /// Random seed for sample generation and noise
    pub seed: u64,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// Raise the default log level to debug
    pub verbose: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum Command {
    /// Run a simulation
    Run(Config),

    /// Print usage and exit
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If --seed is not provided, a time-based seed is used.
    pub fn from_args(args: &[String]) -> Result<Command> {
        let mut text: Option<String> = None;
        let mut sample_len: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut simulation = SimulationConfig::default();
        let mut print_config = false;
        let mut print_metrics = true;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => {
                    text = Some(next_value(args, &mut i, "--text requires a message")?.to_string());
                }
                "--encoding" => {
                    let tag = next_value(args, &mut i, "--encoding requires a scheme")?;
                    simulation.encoding = tag.parse::<LineEncoding>()?;
                }
                "--signal" => {
                    let source = next_value(args, &mut i, "--signal requires encoded|received")?;
                    simulation.signal_source = parse_signal_source(source)?;
                }
                "--seed" => {
                    let value = next_value(args, &mut i, "--seed requires a number")?;
                    seed = Some(value.parse().map_err(|_| config_error("invalid seed"))?);
                }
                "--sample-len" => {
                    let value = next_value(args, &mut i, "--sample-len requires a number")?;
                    sample_len = Some(value.parse().map_err(|_| config_error("invalid sample-len"))?);
                }
                "--noise" => {
                    simulation.noise = true;
                }
                "--no-hamming" => {
                    simulation.block_code = false;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    return Ok(Command::Help);
                }
                other => {
                    return Err(config_error(&format!("unknown argument: {other}")));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Command::Run(Config {
            text,
            sample_len: sample_len.unwrap_or(DEFAULT_SAMPLE_LEN),
            simulation,
            seed,
            print_config,
            print_metrics,
            verbose,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.text {
            Some(text) => println!("Message: {:?}", text),
            None => println!("Message: (generate sample, {} chars)", self.sample_len),
        }
        println!("Seed: {}", self.seed);
        println!();
        println!("=== Link ===");
        println!("Line encoding: {}", self.simulation.encoding);
        println!("Block code: {}", on_off(self.simulation.block_code));
        println!("Noise: {}", on_off(self.simulation.noise));
        println!("Signal source: {}", self.simulation.signal_source.name());
        println!();
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| config_error(missing))
}

fn parse_signal_source(value: &str) -> Result<SignalSource> {
    match value {
        "encoded" => Ok(SignalSource::Encoded),
        "received" => Ok(SignalSource::Received),
        other => Err(config_error(&format!("unknown signal source: {other}"))),
    }
}

fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub fn print_help() {
    println!("link-sim: Link-layer transmission simulator");
    println!();
    println!("USAGE:");
    println!("    link-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --text <S>              Message to send (default: generated sample)");
    println!("    --sample-len <N>        Generated sample length (default: {})", DEFAULT_SAMPLE_LEN);
    println!("    --seed <N>              Random seed for determinism");
    println!();
    println!("    --encoding <TAG>        NRZ-L | Manchester | NRZ-I | AMI |");
    println!("                            \"Differential Manchester\" (default: NRZ-L)");
    println!("    --noise                 Flip one random bit in transit");
    println!("    --no-hamming            Send raw bytes without the (12,8) block code");
    println!("    --signal <SRC>          Signal drawn from encoded|received bits (default: encoded)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --verbose, -v           Debug logging on stderr (RUST_LOG overrides)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    link-sim                                   # Random sample, NRZ-L");
    println!("    link-sim --seed 42 --noise                 # Deterministic noisy run");
    println!("    link-sim --text Hello --encoding AMI       # Specific message and scheme");
    println!("    link-sim --noise --no-hamming --signal received");
    println!();
}
