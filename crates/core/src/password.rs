use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::output::TransformResult;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        PasswordOptions {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    /// Enabled alphabets concatenated in fixed order: upper, lower, digits,
    /// symbols.
    pub fn charset(&self) -> String {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, alphabet)| alphabet)
        .collect()
    }
}

pub fn apply<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> Result<TransformResult> {
    let password = generate(options, rng)?;
    Ok(TransformResult::text(password))
}

/// Draws `length` characters independently and uniformly from the enabled
/// alphabets.
pub fn generate<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> Result<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(TransformError::configuration(format!(
            "password length must be between {MIN_LENGTH} and {MAX_LENGTH}, got {}",
            options.length
        )));
    }

    let charset: Vec<char> = options.charset().chars().collect();
    if charset.is_empty() {
        return Err(TransformError::configuration(
            "no character classes selected",
        ));
    }

    Ok((0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect())
}
