//! Sample message generation.
//!
//! When no message is given we generate one from the seed: short words over a
//! lowercase alphabet with the occasional capital and punctuation, all inside
//! the single-byte range the framing accepts.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const PUNCTUATION: &[u8] = b".,!?";

/// Generate a sample message of exactly `len` characters.
pub fn generate_sample_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(len);

    while text.len() < len {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&generate_word(&mut rng));
    }

    // ASCII only, so byte and char lengths agree
    text.truncate(len);
    text
}

/// One word of 2..=7 letters, maybe capitalized, maybe punctuated.
fn generate_word(rng: &mut ChaCha8Rng) -> String {
    let word_len = rng.gen_range(2..=7);
    let mut word: String = (0..word_len)
        .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
        .collect();

    if rng.gen_bool(0.2) {
        word[..1].make_ascii_uppercase();
    }
    if rng.gen_bool(0.15) {
        word.push(char::from(PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())]));
    }
    word
}
