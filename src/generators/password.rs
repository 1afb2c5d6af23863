// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use thiserror::Error;

use crate::models::PasswordGenerationOptions;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Build the alphabet for the given options. Lowercase is always part of it.
fn build_alphabet(options: &PasswordGenerationOptions) -> Vec<u8> {
    let mut chars = Vec::with_capacity(LOWERCASE.len() + UPPERCASE.len() + NUMBERS.len() + SYMBOLS.len());

    chars.extend_from_slice(LOWERCASE);
    if options.include_uppercase {
        chars.extend_from_slice(UPPERCASE);
    }
    if options.include_numbers {
        chars.extend_from_slice(NUMBERS);
    }
    if options.include_symbols {
        chars.extend_from_slice(SYMBOLS);
    }

    chars
}

/// Generate a password from the operating system's CSPRNG.
pub fn generate_password(options: &PasswordGenerationOptions) -> Result<String, GeneratorError> {
    generate_password_with(&mut OsRng, options)
}

/// Generate a password by sampling the alphabet uniformly and independently `length` times.
///
/// The rng must be cryptographically secure: a predictable source makes the
/// generated password guessable.
pub fn generate_password_with<R>(rng: &mut R, options: &PasswordGenerationOptions) -> Result<String, GeneratorError>
where
    R: Rng + CryptoRng,
{
    if options.length == 0 {
        return Err(GeneratorError::InvalidConfiguration(
            "password length must be at least 1".into(),
        ));
    }

    let chars = build_alphabet(options);
    if chars.is_empty() {
        return Err(GeneratorError::InvalidConfiguration(
            "no character set selected".into(),
        ));
    }

    let dist = Uniform::from(0..chars.len());
    let password = (0..options.length)
        .map(|_| chars[dist.sample(&mut *rng)] as char)
        .collect();

    Ok(password)
}
