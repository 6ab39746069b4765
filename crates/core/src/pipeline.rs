//! End-to-end simulation of one transmission.
//!
//! ```text
//! text ─► bits ─► [block encode] ─► [noise] ─► [block decode] ─► bits ─► text
//!                        │                │
//!                        └──── signal ◄───┘   (source chosen by SignalSource)
//! ```
//!
//! Every intermediate stage is returned in the [`Transmission`] so callers can
//! report on it. The only randomness is the noise index, drawn from the RNG the
//! caller passes in.

use crate::bits::Bitstring;
use crate::error::Result;
use crate::framing::{bits_to_text, concat_blocks, split_blocks, text_to_bits};
use crate::hamming::{self, CorrectionOutcome, BLOCK_BITS, DATA_BITS};
use crate::line_coding::{LineEncoding, SignalSequence};
use crate::noise::{inject_single_bit_error, FlipRecord};
use rand::Rng;
use tracing::debug;

/// Which bitstream feeds the line encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalSource {
    /// Bits as they left the sender, before the channel
    #[default]
    Encoded,

    /// Bits as they arrived, after the channel
    Received,
}

impl SignalSource {
    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            SignalSource::Encoded => "encoded",
            SignalSource::Received => "received",
        }
    }
}

/// Options for one simulated transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Line-coding scheme for the signal
    pub encoding: LineEncoding,

    /// Protect each byte with the (12,8) block code
    pub block_code: bool,

    /// Flip one bit in transit
    pub noise: bool,

    /// Stream rendered as the signal
    pub signal_source: SignalSource,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            encoding: LineEncoding::default(),
            block_code: true,
            noise: false,
            signal_source: SignalSource::default(),
        }
    }
}

/// Every stage of one transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Message text as bits
    pub source_bits: Bitstring,

    /// Stream after the optional block code
    pub encoded: Bitstring,

    /// Stream after the optional noise channel
    pub received: Bitstring,

    /// The injected error, if noise was on
    pub flip: Option<FlipRecord>,

    /// One entry per decoded block; empty when the block code is off
    pub corrections: Vec<CorrectionOutcome>,

    /// Recovered message bits
    pub output_bits: Bitstring,

    /// Recovered message text
    pub output_text: String,

    /// Line-coded signal
    pub signal: SignalSequence,
}

impl Transmission {
    /// Index flipped by the channel, if any.
    pub fn flipped_index(&self) -> Option<usize> {
        self.flip.as_ref().map(|f| f.flipped_index)
    }

    /// Decoded blocks whose syndrome was non-zero.
    pub fn blocks_with_errors(&self) -> impl Iterator<Item = (usize, &CorrectionOutcome)> {
        self.corrections
            .iter()
            .enumerate()
            .filter(|(_, outcome)| outcome.error_detected())
    }

    /// Bits from which the signal was drawn.
    pub fn signal_bits(&self, source: SignalSource) -> &Bitstring {
        match source {
            SignalSource::Encoded => &self.encoded,
            SignalSource::Received => &self.received,
        }
    }
}

/// Encode every 8-bit block of `bits`.
///
/// # Errors
/// `FramingError::RaggedBlock` if `bits` is not a whole number of bytes.
pub fn encode_stream(bits: &Bitstring) -> Result<Bitstring> {
    let blocks = split_blocks(bits, DATA_BITS)?
        .iter()
        .map(hamming::encode)
        .collect::<Result<Vec<_>>>()?;
    Ok(concat_blocks(blocks))
}

/// Decode every 12-bit block of `bits`, returning the data and per-block outcomes.
///
/// # Errors
/// `FramingError::RaggedBlock` if `bits` is not a whole number of blocks.
pub fn decode_stream(bits: &Bitstring) -> Result<(Bitstring, Vec<CorrectionOutcome>)> {
    let outcomes = split_blocks(bits, BLOCK_BITS)?
        .iter()
        .map(hamming::decode)
        .collect::<Result<Vec<_>>>()?;
    let data = concat_blocks(outcomes.iter().map(|o| o.corrected.clone()));
    Ok((data, outcomes))
}

/// Run `text` through the configured stages.
///
/// # Errors
/// - `FramingError::UnrepresentableChar` if `text` has a character above U+00FF
/// - `NoiseError::EmptyInput` if noise is on and `text` is empty
pub fn simulate<R: Rng + ?Sized>(
    text: &str,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Transmission> {
    let source_bits = text_to_bits(text)?;

    let encoded = if config.block_code {
        encode_stream(&source_bits)?
    } else {
        source_bits.clone()
    };

    let flip = if config.noise {
        Some(inject_single_bit_error(&encoded, rng)?)
    } else {
        None
    };
    let received = flip
        .as_ref()
        .map_or_else(|| encoded.clone(), |f| f.result.clone());

    let (output_bits, corrections) = if config.block_code {
        decode_stream(&received)?
    } else {
        (received.clone(), Vec::new())
    };

    let output_text = bits_to_text(&output_bits)?;

    let signal = match config.signal_source {
        SignalSource::Encoded => config.encoding.encode(&encoded),
        SignalSource::Received => config.encoding.encode(&received),
    };

    debug!(
        chars = text.chars().count(),
        coded_bits = encoded.len(),
        flipped = ?flip.as_ref().map(|f| f.flipped_index),
        corrected = corrections.iter().filter(|o| o.error_position().is_some()).count(),
        encoding = config.encoding.name(),
        "transmission simulated"
    );

    Ok(Transmission {
        source_bits,
        encoded,
        received,
        flip,
        corrections,
        output_bits,
        output_text,
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FramingError, NoiseError};
    use crate::hamming::BlockStatus;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_clean_transmission() {
        let config = SimulationConfig::default();
        let tx = simulate("Hi", &config, &mut rng(1)).unwrap();

        assert_eq!(tx.source_bits.len(), 16);
        assert_eq!(tx.encoded.len(), 24);
        assert_eq!(tx.received, tx.encoded);
        assert!(tx.flip.is_none());
        assert_eq!(tx.corrections.len(), 2);
        assert!(tx.corrections.iter().all(|o| o.status == BlockStatus::Clean));
        assert_eq!(tx.output_bits, tx.source_bits);
        assert_eq!(tx.output_text, "Hi");
        assert_eq!(tx.signal.len(), 24);
    }

    #[test]
    fn test_noise_is_corrected() {
        let config = SimulationConfig {
            noise: true,
            ..SimulationConfig::default()
        };

        for seed in 0..50 {
            let tx = simulate("link", &config, &mut rng(seed)).unwrap();
            let index = tx.flipped_index().unwrap();

            assert_eq!(tx.encoded.diff_positions(&tx.received), vec![index]);
            assert_eq!(tx.output_text, "link");

            let hit: Vec<_> = tx.blocks_with_errors().collect();
            assert_eq!(hit.len(), 1);
            let (block, outcome) = hit[0];
            assert_eq!(block, index / BLOCK_BITS);
            assert_eq!(outcome.error_position(), Some(index % BLOCK_BITS + 1));
        }
    }

    #[test]
    fn test_noise_without_block_code_corrupts() {
        let config = SimulationConfig {
            noise: true,
            block_code: false,
            ..SimulationConfig::default()
        };

        let tx = simulate("link", &config, &mut rng(3)).unwrap();
        assert!(tx.corrections.is_empty());
        assert_eq!(tx.encoded, tx.source_bits);
        assert_eq!(tx.output_bits, tx.received);
        assert_ne!(tx.output_text, "link");
        assert_eq!(tx.output_bits.diff_positions(&tx.source_bits).len(), 1);
    }

    #[test]
    fn test_signal_source() {
        let mut config = SimulationConfig {
            noise: true,
            encoding: LineEncoding::NrzL,
            ..SimulationConfig::default()
        };

        let tx = simulate("A", &config, &mut rng(9)).unwrap();
        assert_eq!(tx.signal, LineEncoding::NrzL.encode(&tx.encoded));

        config.signal_source = SignalSource::Received;
        let tx = simulate("A", &config, &mut rng(9)).unwrap();
        assert_eq!(tx.signal, LineEncoding::NrzL.encode(&tx.received));
        assert_eq!(tx.signal_bits(SignalSource::Received), &tx.received);
    }

    #[test]
    fn test_signal_length_follows_encoding() {
        for encoding in LineEncoding::ALL {
            let config = SimulationConfig {
                encoding,
                ..SimulationConfig::default()
            };
            let tx = simulate("ok", &config, &mut rng(0)).unwrap();
            assert_eq!(tx.signal.len(), tx.encoded.len() * encoding.samples_per_bit());
        }
    }

    #[test]
    fn test_empty_text() {
        let tx = simulate("", &SimulationConfig::default(), &mut rng(0)).unwrap();
        assert!(tx.encoded.is_empty());
        assert!(tx.signal.is_empty());
        assert_eq!(tx.output_text, "");

        let config = SimulationConfig {
            noise: true,
            ..SimulationConfig::default()
        };
        let err = simulate("", &config, &mut rng(0)).unwrap_err();
        assert!(matches!(err, Error::Noise(NoiseError::EmptyInput)));
    }

    #[test]
    fn test_unrepresentable_text() {
        let err = simulate("日本", &SimulationConfig::default(), &mut rng(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::UnrepresentableChar { position: 0, .. })
        ));
    }

    #[test]
    fn test_decode_stream_rejects_ragged_input() {
        let bits: Bitstring = "1010101010101".parse().unwrap();
        assert!(decode_stream(&bits).is_err());
        assert!(encode_stream(&bits).is_err());
    }
}
