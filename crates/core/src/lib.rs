//! link-sim-core: simulation of one link-layer transmission
//!
//! This library provides the core components for a learning-focused system that:
//! - Frames text as 8-bit characters
//! - Protects each byte with a (12,8) Hamming-style block code
//! - Corrupts a single bit to model channel noise (seeded randomness)
//! - Decodes and corrects the received blocks
//! - Maps a bitstream onto one of five line-coding schemes
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: Bit / Bitstring data model
//! - `hamming`: (12,8) block code with single-bit correction
//! - `noise`: single-bit noise channel with an injectable RNG
//! - `line_coding`: NRZ-L, Manchester, NRZ-I, AMI, Differential Manchester
//! - `framing`: text ↔ bits and fixed-size block chunking
//! - `pipeline`: end-to-end transmission
//! - `metrics`: observable results of a transmission
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned
//! - **Stateless transforms**: every stage returns a new value; per-call
//!   signal state never outlives the call
//! - **Deterministic**: Seeded randomness makes runs reproducible

pub mod bits;
pub mod error;
pub mod framing;
pub mod hamming;
pub mod line_coding;
pub mod metrics;
pub mod noise;
pub mod pipeline;

// Re-export commonly used types
pub use bits::{Bit, Bitstring};
pub use error::{Error, Result};
pub use hamming::{BlockStatus, CorrectionOutcome};
pub use line_coding::{LineEncoding, SignalLevel, SignalSequence};
pub use noise::{FlipRecord, NoiseChannel};
pub use pipeline::{simulate, SignalSource, SimulationConfig, Transmission};
