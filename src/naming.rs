use anyhow::Result;
use log::info;
use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::E2eError;

pub const DEFAULT_NAME_LENGTH: usize = 15;
pub const ALLOWED_SPECIAL_CHARS: &str = "-_.";
pub const MAX_NAME_LENGTH: usize = 100;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest name that still fits the letter, digit, special-char prefix.
pub const MIN_NAME_LENGTH: usize = 2 + ALLOWED_SPECIAL_CHARS.len();

/// Generate a random repository name of exactly `length` characters.
///
/// Layout: one ASCII letter, one digit, the literal `-_.`, then ASCII
/// alphanumerics. Collisions are not checked.
pub fn generate_repo_name(length: usize) -> Result<String> {
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(E2eError::InvalidNameLength {
            length,
            min: MIN_NAME_LENGTH,
            max: MAX_NAME_LENGTH,
        }
        .into());
    }

    let mut rng = rand::thread_rng();
    let mut name = String::with_capacity(length);

    name.push(*LETTERS.choose(&mut rng).unwrap_or(&b'a') as char);
    name.push(char::from(b'0' + rng.gen_range(0..10u8)));
    name.push_str(ALLOWED_SPECIAL_CHARS);
    name.push_str(&Alphanumeric.sample_string(&mut rng, length - MIN_NAME_LENGTH));

    info!("Generated test repo with name: {}", name);

    Ok(name)
}

/// True when `name` has the shape produced by [`generate_repo_name`].
pub fn is_generated_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&bytes.len()) {
        return false;
    }

    bytes[0].is_ascii_alphabetic()
        && bytes[1].is_ascii_digit()
        && &bytes[2..MIN_NAME_LENGTH] == ALLOWED_SPECIAL_CHARS.as_bytes()
        && bytes[MIN_NAME_LENGTH..].iter().all(u8::is_ascii_alphanumeric)
}
