//! Error types for the link-sim system.
//!
//! Every failure in the core is a local validation failure: there is no I/O
//! and nothing to retry. Operations either succeed completely or return an
//! error without having produced partial output.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bits: building a bitstring from symbols that are not 0/1
/// - Block code: wrong block size handed to encode/decode
/// - Noise: nothing to corrupt
/// - Line coding: unknown encoding tag
/// - Framing: text or block boundaries that do not line up
#[derive(Debug, Error)]
pub enum Error {
    /// Bitstring construction failed
    #[error("bit error: {0}")]
    Bits(#[from] BitError),

    /// Block code precondition violated
    #[error("block code error: {0}")]
    BlockCode(#[from] BlockCodeError),

    /// Noise channel precondition violated
    #[error("noise channel error: {0}")]
    Noise(#[from] NoiseError),

    /// Line coding selection failed
    #[error("line coding error: {0}")]
    LineCoding(#[from] LineCodingError),

    /// Text or block framing failed
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while building a bitstring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitError {
    /// An integer other than 0 or 1
    #[error("invalid bit value {value} at position {position}")]
    InvalidBit { position: usize, value: u8 },

    /// A character other than '0' or '1'
    #[error("invalid bit symbol {value:?} at position {position}")]
    InvalidSymbol { position: usize, value: char },
}

/// Block code errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockCodeError {
    /// Input block is not the size the operation requires
    #[error("invalid block length: expected {expected} bits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Noise channel errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoiseError {
    /// Zero-length stream: there is no bit to flip
    #[error("cannot inject an error into an empty bitstream")]
    EmptyInput,
}

/// Line coding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineCodingError {
    /// Tag does not name one of the supported schemes
    #[error("unsupported line encoding: {0:?}")]
    UnsupportedEncoding(String),
}

/// Text and block framing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Character has no single-byte code
    #[error("character {ch:?} at position {position} is outside the single-byte range")]
    UnrepresentableChar { ch: char, position: usize },

    /// Bitstream length is not a whole number of characters
    #[error("bitstream of {len} bits is not a multiple of 8")]
    TrailingBits { len: usize },

    /// Block size of zero requested
    #[error("block size must be positive")]
    ZeroBlockSize,

    /// Stream does not split evenly into blocks
    #[error("block {block} has {actual} bits, expected {expected}")]
    RaggedBlock {
        block: usize,
        expected: usize,
        actual: usize,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
