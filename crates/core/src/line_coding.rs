//! Physical-layer line coding.
//!
//! Maps a bitstream onto a sequence of ternary signal levels. Five schemes are
//! supported, selected through the closed [`LineEncoding`] enum:
//!
//! | Scheme                  | Samples/bit | Rule                                            |
//! |-------------------------|-------------|-------------------------------------------------|
//! | NRZ-L                   | 1           | 1 → high, 0 → low                               |
//! | Manchester              | 2           | 1 → high,low; 0 → low,high                      |
//! | NRZ-I                   | 1           | 1 → invert level, 0 → hold                      |
//! | AMI                     | 1           | 0 → zero, 1 → alternate polarity                |
//! | Differential Manchester | 2           | 0 → transition at start, 1 → none at start;     |
//! |                         |             | always a mid-bit transition                     |
//!
//! The stateful schemes start from a low level before the first bit. That
//! level lives in a local variable of each call, so calls are independent.
//!
//! # Example
//! ```
//! use link_sim_core::line_coding::{levels, LineEncoding};
//!
//! let bits = "1011".parse().unwrap();
//! assert_eq!(levels(&LineEncoding::NrzL.encode(&bits)), vec![1, -1, 1, 1]);
//! assert_eq!(levels(&LineEncoding::Ami.encode(&bits)), vec![1, 0, -1, 1]);
//! ```

use crate::bits::Bitstring;
use crate::error::{LineCodingError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// One physical signal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum SignalLevel {
    Low = -1,
    Zero = 0,
    High = 1,
}

impl SignalLevel {
    /// Numeric level: -1, 0 or +1.
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Opposite polarity. `Zero` stays `Zero`.
    pub fn inverted(self) -> Self {
        match self {
            SignalLevel::Low => SignalLevel::High,
            SignalLevel::Zero => SignalLevel::Zero,
            SignalLevel::High => SignalLevel::Low,
        }
    }
}

/// Output of a line encoder.
pub type SignalSequence = Vec<SignalLevel>;

/// Convert a signal into its numeric levels.
pub fn levels(signal: &[SignalLevel]) -> Vec<i8> {
    signal.iter().map(|level| level.value()).collect()
}

/// Supported line-coding schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEncoding {
    #[default]
    NrzL,
    Manchester,
    NrzI,
    Ami,
    DifferentialManchester,
}

impl LineEncoding {
    /// Every scheme, in display order.
    pub const ALL: [LineEncoding; 5] = [
        LineEncoding::NrzL,
        LineEncoding::Manchester,
        LineEncoding::NrzI,
        LineEncoding::Ami,
        LineEncoding::DifferentialManchester,
    ];

    /// Display tag.
    pub fn name(self) -> &'static str {
        match self {
            LineEncoding::NrzL => "NRZ-L",
            LineEncoding::Manchester => "Manchester",
            LineEncoding::NrzI => "NRZ-I",
            LineEncoding::Ami => "AMI",
            LineEncoding::DifferentialManchester => "Differential Manchester",
        }
    }

    /// Signal samples produced per input bit.
    pub fn samples_per_bit(self) -> usize {
        match self {
            LineEncoding::NrzL | LineEncoding::NrzI | LineEncoding::Ami => 1,
            LineEncoding::Manchester | LineEncoding::DifferentialManchester => 2,
        }
    }

    /// Encode `bits` with this scheme. Empty input gives an empty signal.
    pub fn encode(self, bits: &Bitstring) -> SignalSequence {
        let signal = match self {
            LineEncoding::NrzL => encode_nrz_l(bits),
            LineEncoding::Manchester => encode_manchester(bits),
            LineEncoding::NrzI => encode_nrz_i(bits),
            LineEncoding::Ami => encode_ami(bits),
            LineEncoding::DifferentialManchester => encode_differential_manchester(bits),
        };
        trace!(encoding = self.name(), bits = bits.len(), samples = signal.len(), "line encoded");
        signal
    }
}

impl fmt::Display for LineEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineEncoding {
    type Err = crate::Error;

    /// Parse a tag such as `"NRZ-L"`, `"nrzl"` or `"differential_manchester"`.
    fn from_str(tag: &str) -> Result<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "nrzl" => Ok(LineEncoding::NrzL),
            "manchester" => Ok(LineEncoding::Manchester),
            "nrzi" => Ok(LineEncoding::NrzI),
            "ami" => Ok(LineEncoding::Ami),
            "differentialmanchester" => Ok(LineEncoding::DifferentialManchester),
            _ => Err(LineCodingError::UnsupportedEncoding(tag.to_string()).into()),
        }
    }
}

/// Encode with the scheme named by `tag`.
///
/// # Errors
/// `LineCodingError::UnsupportedEncoding` if `tag` names no scheme.
pub fn encode_with_tag(tag: &str, bits: &Bitstring) -> Result<SignalSequence> {
    Ok(tag.parse::<LineEncoding>()?.encode(bits))
}

fn level_of(bit: u8) -> SignalLevel {
    if bit == 1 {
        SignalLevel::High
    } else {
        SignalLevel::Low
    }
}

fn encode_nrz_l(bits: &Bitstring) -> SignalSequence {
    bits.iter().map(level_of).collect()
}

fn encode_manchester(bits: &Bitstring) -> SignalSequence {
    let mut signal = Vec::with_capacity(bits.len() * 2);
    for bit in bits.iter() {
        let first = level_of(bit);
        signal.push(first);
        signal.push(first.inverted());
    }
    signal
}

fn encode_nrz_i(bits: &Bitstring) -> SignalSequence {
    let mut current = SignalLevel::Low;
    let mut signal = Vec::with_capacity(bits.len());
    for bit in bits.iter() {
        if bit == 1 {
            current = current.inverted();
        }
        signal.push(current);
    }
    signal
}

fn encode_ami(bits: &Bitstring) -> SignalSequence {
    let mut polarity = SignalLevel::Low;
    let mut signal = Vec::with_capacity(bits.len());
    for bit in bits.iter() {
        if bit == 0 {
            signal.push(SignalLevel::Zero);
        } else {
            polarity = polarity.inverted();
            signal.push(polarity);
        }
    }
    signal
}

fn encode_differential_manchester(bits: &Bitstring) -> SignalSequence {
    let mut current = SignalLevel::Low;
    let mut signal = Vec::with_capacity(bits.len() * 2);
    for bit in bits.iter() {
        if bit == 0 {
            // transition at start; running level unchanged
            signal.push(current.inverted());
            signal.push(current);
        } else {
            signal.push(current);
            current = current.inverted();
            signal.push(current);
        }
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn bits(s: &str) -> Bitstring {
        s.parse().unwrap()
    }

    fn encode(encoding: LineEncoding, s: &str) -> Vec<i8> {
        levels(&encoding.encode(&bits(s)))
    }

    #[test]
    fn test_nrz_l() {
        assert_eq!(encode(LineEncoding::NrzL, "1011"), vec![1, -1, 1, 1]);
    }

    #[test]
    fn test_manchester() {
        assert_eq!(encode(LineEncoding::Manchester, "10"), vec![1, -1, -1, 1]);
    }

    #[test]
    fn test_nrz_i() {
        assert_eq!(encode(LineEncoding::NrzI, "1011"), vec![1, 1, -1, 1]);
        // leading zeros hold the initial low level
        assert_eq!(encode(LineEncoding::NrzI, "001"), vec![-1, -1, 1]);
    }

    #[test]
    fn test_ami() {
        assert_eq!(encode(LineEncoding::Ami, "1011"), vec![1, 0, -1, 1]);
        assert_eq!(encode(LineEncoding::Ami, "000"), vec![0, 0, 0]);
    }

    #[test]
    fn test_differential_manchester() {
        assert_eq!(
            encode(LineEncoding::DifferentialManchester, "10"),
            vec![-1, 1, -1, 1]
        );
        assert_eq!(
            encode(LineEncoding::DifferentialManchester, "0011"),
            vec![1, -1, 1, -1, -1, 1, 1, -1]
        );
    }

    #[test]
    fn test_length_invariants() {
        let input = bits("1100101000111011");
        for encoding in LineEncoding::ALL {
            let signal = encoding.encode(&input);
            assert_eq!(signal.len(), input.len() * encoding.samples_per_bit(), "{encoding}");
        }
    }

    #[test]
    fn test_empty_input() {
        for encoding in LineEncoding::ALL {
            assert!(encoding.encode(&Bitstring::new()).is_empty());
        }
    }

    #[test]
    fn test_zero_level_only_in_ami() {
        let input = bits("0100110001110");
        for encoding in LineEncoding::ALL {
            let has_zero = encoding.encode(&input).contains(&SignalLevel::Zero);
            assert_eq!(has_zero, encoding == LineEncoding::Ami, "{encoding}");
        }
    }

    #[test]
    fn test_ami_marks_alternate() {
        let input = bits("1101001110101");
        let signal = LineEncoding::Ami.encode(&input);

        let mut last_mark: Option<SignalLevel> = None;
        for (bit, level) in input.iter().zip(&signal) {
            if bit == 0 {
                assert_eq!(*level, SignalLevel::Zero);
            } else {
                assert_ne!(*level, SignalLevel::Zero);
                if let Some(previous) = last_mark {
                    assert_eq!(*level, previous.inverted());
                }
                last_mark = Some(*level);
            }
        }
    }

    #[test]
    fn test_manchester_always_transitions() {
        let input = bits("0001111010");
        for encoding in [LineEncoding::Manchester, LineEncoding::DifferentialManchester] {
            let signal = encoding.encode(&input);
            for pair in signal.chunks(2) {
                assert_ne!(pair[0], pair[1], "{encoding}");
            }
        }
    }

    #[test]
    fn test_calls_are_independent() {
        let input = bits("1");
        let first = LineEncoding::NrzI.encode(&input);
        let second = LineEncoding::NrzI.encode(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_tags() {
        for encoding in LineEncoding::ALL {
            assert_eq!(encoding.name().parse::<LineEncoding>().unwrap(), encoding);
        }
        assert_eq!("nrzl".parse::<LineEncoding>().unwrap(), LineEncoding::NrzL);
        assert_eq!(
            "differential_manchester".parse::<LineEncoding>().unwrap(),
            LineEncoding::DifferentialManchester
        );
    }

    #[test]
    fn test_unsupported_encoding() {
        let err = encode_with_tag("4B5B", &bits("1010")).unwrap_err();
        match err {
            Error::LineCoding(LineCodingError::UnsupportedEncoding(tag)) => assert_eq!(tag, "4B5B"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
