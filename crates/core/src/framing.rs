//! Text framing and block chunking.
//!
//! Text travels as a fixed-width single-byte code: every character becomes 8
//! bits, most significant first. Only characters U+0000..=U+00FF have a code,
//! which keeps the mapping lossless and invertible.
//!
//! ```text
//!   'H'        'i'
//! 01001000   01101001
//! ```
//!
//! The block code works on fixed-size chunks, so a message stream is split
//! into 8-bit blocks before encoding and into 12-bit blocks before decoding.
//! A stream that does not divide evenly is rejected rather than handed to the
//! block code as a short final block.

use crate::bits::Bitstring;
use crate::error::{FramingError, Result};

/// Bits per character.
pub const CHAR_BITS: usize = 8;

/// Convert text to its bitstream.
///
/// # Errors
/// `FramingError::UnrepresentableChar` for any character above U+00FF.
pub fn text_to_bits(text: &str) -> Result<Bitstring> {
    let mut parts = Vec::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        let byte = u8::try_from(u32::from(ch))
            .map_err(|_| FramingError::UnrepresentableChar { ch, position })?;
        parts.push(Bitstring::from_byte(byte));
    }
    Ok(parts.into_iter().collect())
}

/// Convert a bitstream back to text.
///
/// # Errors
/// `FramingError::TrailingBits` if the length is not a multiple of 8.
pub fn bits_to_text(bits: &Bitstring) -> Result<String> {
    if bits.len() % CHAR_BITS != 0 {
        return Err(FramingError::TrailingBits { len: bits.len() }.into());
    }

    Ok(bits
        .as_slice()
        .chunks(CHAR_BITS)
        .map(|byte| {
            let code = byte.iter().fold(0u8, |acc, &b| (acc << 1) | b);
            char::from(code)
        })
        .collect())
}

/// Split `bits` into consecutive blocks of exactly `size` bits.
///
/// An empty stream yields no blocks.
///
/// # Errors
/// - `FramingError::ZeroBlockSize` if `size` is 0
/// - `FramingError::RaggedBlock` if the final block would be short
pub fn split_blocks(bits: &Bitstring, size: usize) -> Result<Vec<Bitstring>> {
    if size == 0 {
        return Err(FramingError::ZeroBlockSize.into());
    }

    let remainder = bits.len() % size;
    if remainder != 0 {
        return Err(FramingError::RaggedBlock {
            block: bits.len() / size,
            expected: size,
            actual: remainder,
        }
        .into());
    }

    Ok(bits
        .as_slice()
        .chunks(size)
        .map(Bitstring::from_trusted_slice)
        .collect())
}

/// Concatenate blocks back into one stream.
pub fn concat_blocks<I: IntoIterator<Item = Bitstring>>(blocks: I) -> Bitstring {
    blocks.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_text_to_bits() {
        let bits = text_to_bits("Hi").unwrap();
        assert_eq!(bits.to_string(), "0100100001101001");
    }

    #[test]
    fn test_round_trip_latin1() {
        let text = "Hello, wörld! ¿Qué?";
        let bits = text_to_bits(text).unwrap();
        assert_eq!(bits.len(), text.chars().count() * CHAR_BITS);
        assert_eq!(bits_to_text(&bits).unwrap(), text);
    }

    #[test]
    fn test_all_single_byte_chars() {
        let text: String = (0u8..=255).map(char::from).collect();
        let bits = text_to_bits(&text).unwrap();
        assert_eq!(bits_to_text(&bits).unwrap(), text);
    }

    #[test]
    fn test_unrepresentable_char() {
        let err = text_to_bits("ok €").unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::UnrepresentableChar { ch: '€', position: 3 })
        ));
    }

    #[test]
    fn test_trailing_bits() {
        let bits: Bitstring = "0100100001".parse().unwrap();
        let err = bits_to_text(&bits).unwrap_err();
        assert!(matches!(err, Error::Framing(FramingError::TrailingBits { len: 10 })));
    }

    #[test]
    fn test_empty() {
        assert!(text_to_bits("").unwrap().is_empty());
        assert_eq!(bits_to_text(&Bitstring::new()).unwrap(), "");
        assert!(split_blocks(&Bitstring::new(), 12).unwrap().is_empty());
    }

    #[test]
    fn test_split_and_concat() {
        let bits: Bitstring = "101100101111".parse().unwrap();
        let blocks = split_blocks(&bits, 4).unwrap();
        let rendered: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(rendered, vec!["1011", "0010", "1111"]);
        assert_eq!(concat_blocks(blocks), bits);
    }

    #[test]
    fn test_split_zero_size() {
        let bits: Bitstring = "1011".parse().unwrap();
        let err = split_blocks(&bits, 0).unwrap_err();
        assert!(matches!(err, Error::Framing(FramingError::ZeroBlockSize)));
    }

    #[test]
    fn test_split_ragged() {
        let bits: Bitstring = "10110010101".parse().unwrap();
        let err = split_blocks(&bits, 8).unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::RaggedBlock {
                block: 1,
                expected: 8,
                actual: 3
            })
        ));
    }
}
