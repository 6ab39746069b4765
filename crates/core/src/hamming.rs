//! Hamming-style (12,8) block code with single-bit correction.
//!
//! An 8-bit data block is protected by four even-parity bits. The parity bits
//! sit at 1-indexed positions 1, 2, 4 and 8 of the 12-bit block and the data
//! bits fill the remaining positions in order:
//!
//! ```text
//! position:  1   2   3   4   5   6   7   8   9  10  11  12
//! bit:      p0  p1  d0  p2  d1  d2  d3  p3  d4  d5  d6  d7
//! ```
//!
//! Every group is written out as a table below rather than derived, so the
//! layout can be audited against a worked example by eye.
//!
//! # Decoding
//!
//! The four syndrome bits form an integer `s1 + 2·s2 + 4·s4 + 8·s8`. A single
//! flipped bit at position `p` produces syndrome `p`. Syndromes 13..=15 can
//! only come from multi-bit damage and have no position to correct; they are
//! reported as [`BlockStatus::Uncorrectable`] and the block is passed through
//! untouched.

use crate::bits::{Bit, Bitstring};
use crate::error::{BlockCodeError, Result};
use tracing::{debug, warn};

/// Data bits per block.
pub const DATA_BITS: usize = 8;

/// Coded bits per block.
pub const BLOCK_BITS: usize = 12;

/// Data-bit indices XORed into each parity bit p0..p3.
const PARITY_GROUPS: [&[usize]; 4] = [
    &[0, 1, 3, 4, 6],
    &[0, 2, 3, 5, 6],
    &[1, 2, 3, 7],
    &[4, 5, 6, 7],
];

/// Source of each output position: `Parity(k)` is pk, `Data(k)` is dk.
const LAYOUT: [Slot; BLOCK_BITS] = [
    Slot::Parity(0),
    Slot::Parity(1),
    Slot::Data(0),
    Slot::Parity(2),
    Slot::Data(1),
    Slot::Data(2),
    Slot::Data(3),
    Slot::Parity(3),
    Slot::Data(4),
    Slot::Data(5),
    Slot::Data(6),
    Slot::Data(7),
];

/// Received-block indices XORed into syndrome bits s1, s2, s4, s8.
const SYNDROME_GROUPS: [&[usize]; 4] = [
    &[0, 2, 4, 6, 8, 10],
    &[1, 2, 5, 6, 9, 10],
    &[3, 4, 5, 6, 11],
    &[7, 8, 9, 10, 11],
];

/// Block indices holding d0..d7.
const DATA_POSITIONS: [usize; DATA_BITS] = [2, 4, 5, 6, 8, 9, 10, 11];

#[derive(Debug, Clone, Copy)]
enum Slot {
    Parity(usize),
    Data(usize),
}

/// What decoding found in one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// Syndrome 0: no error detected
    Clean,

    /// Single-bit error at 1-indexed `position` (1..=12), corrected
    Corrected { position: usize },

    /// Syndrome 13..=15: no matching position, nothing corrected
    Uncorrectable { syndrome: u8 },
}

/// Result of decoding one 12-bit block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionOutcome {
    /// The 8 data bits after any correction
    pub corrected: Bitstring,

    /// What the syndrome reported
    pub status: BlockStatus,
}

impl CorrectionOutcome {
    /// 1-indexed position of the corrected bit, if a correction was made.
    pub fn error_position(&self) -> Option<usize> {
        match self.status {
            BlockStatus::Corrected { position } => Some(position),
            BlockStatus::Clean | BlockStatus::Uncorrectable { .. } => None,
        }
    }

    /// True when the syndrome was non-zero.
    pub fn error_detected(&self) -> bool {
        self.status != BlockStatus::Clean
    }
}

/// Encode an 8-bit data block into a 12-bit protected block.
///
/// # Errors
/// `BlockCodeError::InvalidLength` unless `data` has exactly 8 bits.
pub fn encode(data: &Bitstring) -> Result<Bitstring> {
    check_len(data, DATA_BITS)?;
    let d = data.as_slice();

    let parity: Vec<Bit> = PARITY_GROUPS.iter().map(|group| xor_all(d, group)).collect();

    let block = LAYOUT
        .iter()
        .map(|slot| match *slot {
            Slot::Parity(k) => parity[k],
            Slot::Data(k) => d[k],
        })
        .collect();

    Ok(Bitstring::from_trusted(block))
}

/// Decode a 12-bit block, correcting at most one flipped bit.
///
/// # Errors
/// `BlockCodeError::InvalidLength` unless `block` has exactly 12 bits.
pub fn decode(block: &Bitstring) -> Result<CorrectionOutcome> {
    check_len(block, BLOCK_BITS)?;
    let mut b = block.as_slice().to_vec();

    let syndrome = syndrome(&b);

    let status = match usize::from(syndrome) {
        0 => BlockStatus::Clean,
        position @ 1..=BLOCK_BITS => {
            b[position - 1] ^= 1;
            debug!(position, "corrected single-bit error");
            BlockStatus::Corrected { position }
        }
        _ => {
            warn!(syndrome, block = %block, "syndrome has no matching bit position");
            BlockStatus::Uncorrectable { syndrome }
        }
    };

    let corrected = DATA_POSITIONS.iter().map(|&i| b[i]).collect();

    Ok(CorrectionOutcome {
        corrected: Bitstring::from_trusted(corrected),
        status,
    })
}

/// Compute the 4-bit syndrome of a 12-bit block.
fn syndrome(block: &[Bit]) -> u8 {
    SYNDROME_GROUPS
        .iter()
        .enumerate()
        .fold(0u8, |acc, (weight, group)| acc | (xor_all(block, group) << weight))
}

fn xor_all(bits: &[Bit], indices: &[usize]) -> Bit {
    indices.iter().fold(0, |acc, &i| acc ^ bits[i])
}

fn check_len(bits: &Bitstring, expected: usize) -> Result<()> {
    if bits.len() != expected {
        return Err(BlockCodeError::InvalidLength {
            expected,
            actual: bits.len(),
        }
        .into());
    }
    Ok(())
}
