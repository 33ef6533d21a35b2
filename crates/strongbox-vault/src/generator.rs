// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random password generation.

use rand::rngs::OsRng;
use rand::Rng;
use strongbox_core::StrongboxError;

/// ASCII letters, digits and the 32 ASCII punctuation characters.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Generate a password of `length` characters drawn uniformly from [`ALPHABET`]
/// using the operating system CSPRNG.
pub fn generate_password(length: usize) -> Result<String, StrongboxError> {
    if length == 0 {
        return Err(StrongboxError::InvalidInput(
            "password length must be at least 1".to_string(),
        ));
    }

    let mut rng = OsRng;
    let password = (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_letters_digits_and_punctuation() {
        assert_eq!(ALPHABET.len(), 26 + 26 + 10 + 32);
        assert!(ALPHABET.iter().all(|c| c.is_ascii_graphic()));
        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ALPHABET.len());
    }

    #[test]
    fn generates_requested_length_from_alphabet() {
        let password = generate_password(64).unwrap();
        assert_eq!(password.chars().count(), 64);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn zero_length_is_invalid_input() {
        assert!(matches!(
            generate_password(0),
            Err(StrongboxError::InvalidInput(_))
        ));
    }

    #[test]
    fn consecutive_passwords_differ() {
        assert_ne!(generate_password(25).unwrap(), generate_password(25).unwrap());
    }
}
