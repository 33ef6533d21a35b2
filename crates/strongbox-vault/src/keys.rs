// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The key manager: master password verification and per-operation entry keys.
//!
//! The verification value gates access; the entry key protects stored fields.
//! They come from different KDFs with independent parameters so recovering
//! one output does not yield the other.

use std::num::NonZeroU32;

use secrecy::{ExposeSecret, SecretString};
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

use crate::crypto;
use crate::kdf::{self, KdfParams, ENTRY_KEY_LEN, VERIFICATION_LEN};

/// Outcome of checking a candidate password against a stored value.
///
/// Only these two non-match outcomes collapse into `false` in
/// [`KeyManager::verify`]; storage errors never reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The password derives the stored value.
    Match,
    /// Well-formed inputs that do not match.
    Mismatch,
    /// Empty candidate or a stored value of the wrong length.
    Malformed,
}

impl Verification {
    pub fn is_match(self) -> bool {
        self == Verification::Match
    }
}

/// A 32-byte entry encryption key, zeroed on drop.
///
/// Derived for a single add or view and never persisted or logged.
pub struct EntryKey(Zeroizing<[u8; ENTRY_KEY_LEN]>);

impl EntryKey {
    fn bytes(&self) -> &[u8; ENTRY_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EntryKey([REDACTED])")
    }
}

/// Derives and checks master password material, and encrypts entry fields.
#[derive(Clone)]
pub struct KeyManager {
    salt: Vec<u8>,
    pbkdf2_iterations: NonZeroU32,
    argon2: argon2::Params,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("salt", &"[REDACTED]")
            .field("pbkdf2_iterations", &self.pbkdf2_iterations)
            .field("argon2_memory_kib", &self.argon2.m_cost())
            .field("argon2_iterations", &self.argon2.t_cost())
            .field("argon2_parallelism", &self.argon2.p_cost())
            .finish()
    }
}

impl KeyManager {
    /// Build a key manager from an explicit parameter set.
    pub fn new(params: KdfParams) -> Result<Self, StrongboxError> {
        let pbkdf2_iterations = NonZeroU32::new(params.pbkdf2_iterations).ok_or_else(|| {
            StrongboxError::Config("PBKDF2 iteration count must be non-zero".to_string())
        })?;
        let argon2 = kdf::argon2_params(
            params.argon2_memory_kib,
            params.argon2_iterations,
            params.argon2_parallelism,
        )?;
        Ok(Self {
            salt: params.salt,
            pbkdf2_iterations,
            argon2,
        })
    }

    /// Derive the 64-byte verification value stored in the master key record.
    ///
    /// Deterministic: the same password always yields the same bytes.
    pub fn derive_verification_value(
        &self,
        password: &SecretString,
    ) -> Result<[u8; VERIFICATION_LEN], StrongboxError> {
        let password = non_empty(password)?;
        Ok(kdf::pbkdf2_sha256(
            password,
            &self.salt,
            self.pbkdf2_iterations,
        ))
    }

    /// Check `password` against a stored verification value.
    pub fn check(&self, password: &SecretString, stored: &[u8]) -> Verification {
        let Ok(password) = non_empty(password) else {
            return Verification::Malformed;
        };
        if stored.len() != VERIFICATION_LEN {
            return Verification::Malformed;
        }
        if kdf::pbkdf2_sha256_verify(password, &self.salt, self.pbkdf2_iterations, stored) {
            Verification::Match
        } else {
            Verification::Mismatch
        }
    }

    /// Whether `password` derives `stored`. Comparison is constant-time.
    pub fn verify(&self, password: &SecretString, stored: &[u8]) -> bool {
        self.check(password, stored).is_match()
    }

    /// Derive the Argon2id key for one encrypt or decrypt operation.
    pub fn derive_entry_key(&self, password: &SecretString) -> Result<EntryKey, StrongboxError> {
        let password = non_empty(password)?;
        kdf::argon2id(password, &self.salt, &self.argon2).map(EntryKey)
    }

    /// Encrypt one credential field into a self-describing token.
    pub fn encrypt_field(&self, plaintext: &[u8], key: &EntryKey) -> Result<Vec<u8>, StrongboxError> {
        crypto::seal(key.bytes(), plaintext)
    }

    /// Authenticate and decrypt a field token.
    pub fn decrypt_field(
        &self,
        token: &[u8],
        key: &EntryKey,
    ) -> Result<Zeroizing<Vec<u8>>, StrongboxError> {
        crypto::open(key.bytes(), token)
    }
}

fn non_empty(password: &SecretString) -> Result<&[u8], StrongboxError> {
    let bytes = password.expose_secret().as_bytes();
    if bytes.is_empty() {
        return Err(StrongboxError::InvalidInput(
            "master password must not be empty".to_string(),
        ));
    }
    Ok(bytes)
}
