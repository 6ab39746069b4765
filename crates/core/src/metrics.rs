//! Metrics collection and reporting for a simulated transmission.
//!
//! Summarizes what happened to a message on its way through the link:
//! - Size at each stage (source bits, coded bits, signal samples)
//! - Block-code activity (blocks decoded, corrected, uncorrectable)
//! - Channel damage (flipped index) and what survived it (residual errors)
//!
//! # Design
//!
//! Metrics are derived once from a finished [`Transmission`]; nothing is
//! updated incrementally.

use crate::hamming::BlockStatus;
use crate::pipeline::Transmission;
use std::time::Duration;

/// Observable results of one transmission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransmissionMetrics {
    // === Sizes ===
    /// Characters in the message
    pub chars: usize,

    /// Message bits before protection
    pub source_bits: usize,

    /// Bits on the wire
    pub coded_bits: usize,

    /// Samples in the line-coded signal
    pub signal_samples: usize,

    // === Block code ===
    /// Blocks run through the decoder
    pub blocks_decoded: usize,

    /// Blocks with a corrected single-bit error
    pub blocks_corrected: usize,

    /// Blocks whose syndrome named no bit position
    pub blocks_uncorrectable: usize,

    // === Channel ===
    /// Bit index flipped in transit
    pub flipped_index: Option<usize>,

    /// Message bits that differ between input and output
    pub residual_bit_errors: usize,

    /// Whether the recovered text matches the original
    pub text_intact: bool,

    // === Timing ===
    /// Wall time spent in the simulation
    pub elapsed: Duration,
}

impl TransmissionMetrics {
    /// Derive metrics from a finished transmission.
    pub fn from_transmission(original_text: &str, tx: &Transmission, elapsed: Duration) -> Self {
        let blocks_corrected = tx
            .corrections
            .iter()
            .filter(|o| matches!(o.status, BlockStatus::Corrected { .. }))
            .count();
        let blocks_uncorrectable = tx
            .corrections
            .iter()
            .filter(|o| matches!(o.status, BlockStatus::Uncorrectable { .. }))
            .count();

        Self {
            chars: original_text.chars().count(),
            source_bits: tx.source_bits.len(),
            coded_bits: tx.encoded.len(),
            signal_samples: tx.signal.len(),
            blocks_decoded: tx.corrections.len(),
            blocks_corrected,
            blocks_uncorrectable,
            flipped_index: tx.flipped_index(),
            residual_bit_errors: tx.source_bits.diff_positions(&tx.output_bits).len(),
            text_intact: tx.output_text == original_text,
            elapsed,
        }
    }

    /// Data bits per coded bit (1.0 without the block code).
    ///
    /// Returns 0.0 if nothing was sent.
    pub fn code_rate(&self) -> f64 {
        if self.coded_bits == 0 {
            0.0
        } else {
            self.source_bits as f64 / self.coded_bits as f64
        }
    }

    /// Residual errors per message bit.
    pub fn residual_error_rate(&self) -> f64 {
        if self.source_bits == 0 {
            0.0
        } else {
            self.residual_bit_errors as f64 / self.source_bits as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Transmission Summary ===");
        println!("Duration: {} µs", self.elapsed.as_micros());
        println!();

        println!("=== Sizes ===");
        println!("Characters: {}", self.chars);
        println!("Source bits: {}", self.source_bits);
        println!("Coded bits: {}", self.coded_bits);
        println!("Code rate: {:.3}", self.code_rate());
        println!("Signal samples: {}", self.signal_samples);
        println!();

        println!("=== Channel ===");
        match self.flipped_index {
            Some(index) => println!("Flipped bit: index {}", index),
            None => println!("Flipped bit: none"),
        }
        println!();

        println!("=== Block Code ===");
        println!("Blocks decoded: {}", self.blocks_decoded);
        println!("Blocks corrected: {}", self.blocks_corrected);
        println!("Blocks uncorrectable: {}", self.blocks_uncorrectable);
        println!(
            "Residual bit errors: {} ({:.2}%)",
            self.residual_bit_errors,
            self.residual_error_rate() * 100.0
        );
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.text_intact {
            println!("✓ Message delivered intact");
            if self.blocks_corrected > 0 {
                println!("  {} block(s) repaired by the block code", self.blocks_corrected);
            }
        } else if self.blocks_uncorrectable > 0 {
            println!(
                "✗ Message damaged: {} block(s) uncorrectable",
                self.blocks_uncorrectable
            );
        } else {
            println!(
                "✗ Message damaged: {} residual bit error(s)",
                self.residual_bit_errors
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "chars={}\n\
             source_bits={}\n\
             coded_bits={}\n\
             code_rate={:.4}\n\
             signal_samples={}\n\
             flipped_index={}\n\
             blocks_decoded={}\n\
             blocks_corrected={}\n\
             blocks_uncorrectable={}\n\
             residual_bit_errors={}\n\
             text_intact={}\n",
            self.chars,
            self.source_bits,
            self.coded_bits,
            self.code_rate(),
            self.signal_samples,
            self.flipped_index
                .map_or_else(|| "none".to_string(), |i| i.to_string()),
            self.blocks_decoded,
            self.blocks_corrected,
            self.blocks_uncorrectable,
            self.residual_bit_errors,
            self.text_intact,
        )
    }
}
