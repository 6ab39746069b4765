//! Terminal rendering of a line-coded signal.
//!
//! Draws the signal on three rows (high, zero, low) with one column per
//! sample, and the source bits underneath, centered on their samples:
//!
//! ```text
//!  +1 │ ▀▀  ▀▀▀▀
//!   0 │
//!  -1 │   ▄▄
//!       1 0 1 1
//! ```

use link_sim_core::{Bitstring, SignalLevel};

/// Columns drawn per signal sample.
const SAMPLE_WIDTH: usize = 2;

/// Render `signal` with `bits` as the label row.
///
/// `samples_per_bit` spaces the labels; a signal that does not line up with
/// the bits is drawn without labels.
pub fn render(signal: &[SignalLevel], bits: &Bitstring, samples_per_bit: usize) -> String {
    let mut rows = [String::new(), String::new(), String::new()];

    for &level in signal {
        let row = match level {
            SignalLevel::High => 0,
            SignalLevel::Zero => 1,
            SignalLevel::Low => 2,
        };
        for (i, line) in rows.iter_mut().enumerate() {
            let mark = match (i == row, i) {
                (true, 0) => '▀',
                (true, 1) => '─',
                (true, _) => '▄',
                (false, _) => ' ',
            };
            line.extend(std::iter::repeat(mark).take(SAMPLE_WIDTH));
        }
    }

    let mut out = String::new();
    for (axis, row) in [" +1 │ ", "  0 │ ", " -1 │ "].iter().zip(&rows) {
        out.push_str(format!("{axis}{row}").trim_end());
        out.push('\n');
    }

    if samples_per_bit > 0 && signal.len() == bits.len() * samples_per_bit {
        let cell = SAMPLE_WIDTH * samples_per_bit;
        let labels: String = bits
            .iter()
            .map(|bit| format!("{:^width$}", bit, width = cell))
            .collect();
        out.push_str(&format!("      {}\n", labels.trim_end()));
    }

    out
}
