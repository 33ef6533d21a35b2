// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM field tokens.
//!
//! A token is self-describing:
//!
//! ```text
//! version (1) || nonce (12) || ciphertext (n) || tag (16)
//! ```
//!
//! The version byte is authenticated as associated data. Every call to
//! [`seal`] draws a fresh random 96-bit nonce from the system CSPRNG; nonce
//! reuse under one key would be catastrophic for GCM.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

/// Current token format.
pub const TOKEN_VERSION: u8 = 0x01;

/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Smallest well-formed token: header, nonce and tag around an empty message.
pub const MIN_TOKEN_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

fn cipher(key: &[u8; 32]) -> Result<LessSafeKey, StrongboxError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| StrongboxError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt `plaintext` into a single token.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, StrongboxError> {
    let cipher = cipher(key)?;

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| StrongboxError::Crypto("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    cipher
        .seal_in_place_append_tag(nonce, Aad::from([TOKEN_VERSION]), &mut in_out)
        .map_err(|_| StrongboxError::Crypto("AES-256-GCM encryption failed".to_string()))?;

    let mut token = Vec::with_capacity(1 + NONCE_LEN + in_out.len());
    token.push(TOKEN_VERSION);
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&in_out);
    Ok(token)
}

/// Authenticate and decrypt a token produced by [`seal`].
///
/// A wrong key, a truncated token, an unknown version or any modified byte
/// yields [`StrongboxError::AuthenticationFailure`]. No plaintext is returned
/// unless the tag verifies.
pub fn open(key: &[u8; 32], token: &[u8]) -> Result<Zeroizing<Vec<u8>>, StrongboxError> {
    if token.len() < MIN_TOKEN_LEN || token[0] != TOKEN_VERSION {
        return Err(StrongboxError::AuthenticationFailure);
    }

    let cipher = cipher(key)?;
    let (nonce_bytes, sealed) = token[1..].split_at(NONCE_LEN);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| StrongboxError::AuthenticationFailure)?;

    let mut in_out = Zeroizing::new(sealed.to_vec());
    let plaintext_len = cipher
        .open_in_place(nonce, Aad::from([token[0]]), &mut in_out)
        .map_err(|_| StrongboxError::AuthenticationFailure)?
        .len();
    in_out.truncate(plaintext_len);

    Ok(in_out)
}
