//! Bit-level data model shared by every stage of the simulator.
//!
//! A [`Bitstring`] is an ordered sequence of bits, each stored as the integer
//! 0 or 1. Stages never mutate a bitstring they were handed: every transform
//! returns a new one.
//!
//! # Example
//! ```
//! use link_sim_core::bits::Bitstring;
//!
//! let bits: Bitstring = "1011".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert_eq!(bits.get(1), Some(0));
//! assert_eq!(bits.to_string(), "1011");
//! ```

use crate::error::{BitError, Result};
use std::fmt;
use std::str::FromStr;

/// One binary digit. Only 0 and 1 are ever stored.
pub type Bit = u8;

/// An immutable, ordered sequence of bits.
///
/// # Invariants
/// - every element is 0 or 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstring {
    bits: Vec<Bit>,
}

impl Bitstring {
    /// Create an empty bitstring.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Build a bitstring from integer symbols, rejecting anything but 0/1.
    pub fn from_bits(bits: Vec<Bit>) -> Result<Self> {
        if let Some(position) = bits.iter().position(|&b| b > 1) {
            let value = bits[position];
            return Err(BitError::InvalidBit { position, value }.into());
        }
        Ok(Self { bits })
    }

    /// Expand a byte into its 8 bits, most significant first.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            bits: (0..8).rev().map(|shift| (byte >> shift) & 1).collect(),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when there are no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits.get(index).copied()
    }

    /// Borrow the raw 0/1 symbols.
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// Return a copy with the bit at `index` inverted, or `None` if out of range.
    pub fn with_flipped(&self, index: usize) -> Option<Self> {
        if index >= self.bits.len() {
            return None;
        }
        let mut bits = self.bits.clone();
        bits[index] ^= 1;
        Some(Self { bits })
    }

    /// Indices at which `self` and `other` differ, over their common prefix,
    /// plus every index past the shorter one.
    pub fn diff_positions(&self, other: &Bitstring) -> Vec<usize> {
        let longest = self.len().max(other.len());
        (0..longest)
            .filter(|&i| self.get(i) != other.get(i))
            .collect()
    }

    pub(crate) fn from_trusted(bits: Vec<Bit>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self { bits }
    }

    /// Copy a run of bits taken from an existing bitstring.
    pub(crate) fn from_trusted_slice(bits: &[Bit]) -> Self {
        Self::from_trusted(bits.to_vec())
    }
}

impl FromStr for Bitstring {
    type Err = crate::Error;

    /// Parse a string of `'0'`/`'1'` characters.
    fn from_str(s: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(s.len());
        for (position, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push(0),
                '1' => bits.push(1),
                value => return Err(BitError::InvalidSymbol { position, value }.into()),
            }
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<Bitstring> for Bitstring {
    /// Concatenate bitstrings in order.
    fn from_iter<I: IntoIterator<Item = Bitstring>>(iter: I) -> Self {
        let mut bits = Vec::new();
        for part in iter {
            bits.extend_from_slice(&part.bits);
        }
        Self { bits }
    }
}

impl<'a> IntoIterator for &'a Bitstring {
    type Item = &'a Bit;
    type IntoIter = std::slice::Iter<'a, Bit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}
