//! Single-bit noise channel.
//!
//! Models a noisy link by flipping exactly one bit of the transmitted stream.
//! The index is drawn uniformly from `[0, len)`.
//!
//! # Determinism
//!
//! The random source is a type parameter. [`NoiseChannel::seeded`] builds a
//! channel over a seeded ChaCha8 RNG; given the same seed and inputs, the
//! flipped indices are identical across runs and platforms.

use crate::bits::Bitstring;
use crate::error::{NoiseError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Output of one noise injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipRecord {
    /// The stream with one bit inverted
    pub result: Bitstring,

    /// 0-based index of the inverted bit
    pub flipped_index: usize,
}

/// Flip one uniformly chosen bit of `stream` using the caller's RNG.
///
/// # Errors
/// `NoiseError::EmptyInput` if `stream` has no bits.
pub fn inject_single_bit_error<R: Rng + ?Sized>(stream: &Bitstring, rng: &mut R) -> Result<FlipRecord> {
    if stream.is_empty() {
        return Err(NoiseError::EmptyInput.into());
    }

    let flipped_index = rng.gen_range(0..stream.len());
    let mut bits = stream.as_slice().to_vec();
    bits[flipped_index] ^= 1;
    let result = Bitstring::from_trusted(bits);

    debug!(flipped_index, len = stream.len(), "injected single-bit error");

    Ok(FlipRecord {
        result,
        flipped_index,
    })
}

/// A noise channel owning its random source.
///
/// # Thread Safety
/// Holds mutable RNG state; use one instance per thread.
#[derive(Debug, Clone)]
pub struct NoiseChannel<R = ChaCha8Rng> {
    rng: R,
    flips: u64,
}

impl NoiseChannel<ChaCha8Rng> {
    /// Create a channel over a ChaCha8 RNG seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseChannel<R> {
    /// Create a channel drawing indices from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng, flips: 0 }
    }

    /// Flip exactly one bit of `stream`.
    ///
    /// # Errors
    /// `NoiseError::EmptyInput` if `stream` has no bits.
    pub fn inject_single_bit_error(&mut self, stream: &Bitstring) -> Result<FlipRecord> {
        let record = inject_single_bit_error(stream, &mut self.rng)?;
        self.flips += 1;
        Ok(record)
    }

    /// Number of bits flipped so far.
    pub fn flips(&self) -> u64 {
        self.flips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rand::rngs::mock::StepRng;

    fn stream(s: &str) -> Bitstring {
        s.parse().unwrap()
    }

    #[test]
    fn test_exactly_one_bit_differs() {
        let input = stream("101100111000110101");

        for seed in 0..200 {
            let mut channel = NoiseChannel::seeded(seed);
            let record = channel.inject_single_bit_error(&input).unwrap();

            assert_eq!(record.result.len(), input.len());
            assert_eq!(input.diff_positions(&record.result), vec![record.flipped_index]);
        }
    }

    #[test]
    fn test_exactly_one_bit_differs_across_lengths() {
        let mut content_rng = ChaCha8Rng::seed_from_u64(2024);

        for len in 1..=48 {
            for round in 0..10 {
                let input: Bitstring = (0..len)
                    .map(|_| if content_rng.gen_bool(0.5) { '1' } else { '0' })
                    .collect::<String>()
                    .parse()
                    .unwrap();

                let mut channel = NoiseChannel::seeded(len as u64 * 100 + round);
                let record = channel.inject_single_bit_error(&input).unwrap();

                assert!(record.flipped_index < len);
                assert_eq!(record.result.len(), len);
                assert_eq!(
                    input.diff_positions(&record.result),
                    vec![record.flipped_index],
                    "len {len} input {input}"
                );
            }
        }
    }

    #[test]
    fn test_single_bit_stream() {
        let mut channel = NoiseChannel::seeded(7);
        let record = channel.inject_single_bit_error(&stream("0")).unwrap();
        assert_eq!(record.flipped_index, 0);
        assert_eq!(record.result.to_string(), "1");
    }

    #[test]
    fn test_empty_input() {
        let mut channel = NoiseChannel::seeded(1);
        let err = channel.inject_single_bit_error(&Bitstring::new()).unwrap_err();
        assert!(matches!(err, Error::Noise(NoiseError::EmptyInput)));
        assert_eq!(channel.flips(), 0);
    }

    #[test]
    fn test_determinism() {
        let input = stream("000000000000000000000000");

        let mut a = NoiseChannel::seeded(12345);
        let mut b = NoiseChannel::seeded(12345);

        for _ in 0..20 {
            assert_eq!(
                a.inject_single_bit_error(&input).unwrap(),
                b.inject_single_bit_error(&input).unwrap()
            );
        }
        assert_eq!(a.flips(), 20);
    }

    #[test]
    fn test_injected_rng() {
        // A zero-stepping mock always lands on index 0
        let mut rng = StepRng::new(0, 0);
        let record = inject_single_bit_error(&stream("0110"), &mut rng).unwrap();
        assert_eq!(record.flipped_index, 0);
        assert_eq!(record.result.to_string(), "1110");
    }

    #[test]
    fn test_covers_every_index() {
        let input = stream("00000000");
        let mut seen = [false; 8];
        let mut channel = NoiseChannel::seeded(99);

        for _ in 0..500 {
            let record = channel.inject_single_bit_error(&input).unwrap();
            seen[record.flipped_index] = true;
        }

        assert!(seen.iter().all(|&s| s), "some index never chosen: {seen:?}");
    }
}
