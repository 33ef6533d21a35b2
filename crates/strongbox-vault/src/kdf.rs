// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-based key derivation.
//!
//! Two independent KDFs share one salt:
//! - PBKDF2-HMAC-SHA256 produces the 64-byte master password verification value.
//! - Argon2id (Version::V0x13) produces the 32-byte key that encrypts entry fields.
//!
//! The parameters are not stored in the vault. Changing any of them makes every
//! existing vault unreadable, so [`KdfParams::default`] is fixed.

use std::num::NonZeroU32;

use ring::pbkdf2;
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

/// Salt shared by every Strongbox installation.
///
/// A fixed value keeps existing vaults readable; it does not protect against
/// precomputation across installations.
pub const FIXED_SALT: &[u8] = b"Oh My Gawd!!, I am Vedabahu!!!";

/// Length of the PBKDF2 verification value in bytes.
pub const VERIFICATION_LEN: usize = 64;

/// Length of the Argon2id entry key in bytes.
pub const ENTRY_KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count for the verification value.
pub const PBKDF2_ITERATIONS: u32 = 1_200_000;

/// Argon2id memory cost in KiB (32 MiB).
pub const ARGON2_MEMORY_KIB: u32 = 32 * 1024;

/// Argon2id time cost.
pub const ARGON2_ITERATIONS: u32 = 5;

/// Argon2id lanes.
pub const ARGON2_PARALLELISM: u32 = 4;

/// The complete set of derivation parameters.
///
/// Production code uses [`KdfParams::default`]; tests pass cheaper values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub salt: Vec<u8>,
    pub pbkdf2_iterations: u32,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            salt: FIXED_SALT.to_vec(),
            pbkdf2_iterations: PBKDF2_ITERATIONS,
            argon2_memory_kib: ARGON2_MEMORY_KIB,
            argon2_iterations: ARGON2_ITERATIONS,
            argon2_parallelism: ARGON2_PARALLELISM,
        }
    }
}

/// Derive the 64-byte PBKDF2-HMAC-SHA256 verification value.
pub fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
) -> [u8; VERIFICATION_LEN] {
    let mut out = [0u8; VERIFICATION_LEN];
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, password, &mut out);
    out
}

/// Re-derive and compare against `expected` in constant time.
///
/// `ring` rejects a length mismatch up front, which leaks only the length.
pub fn pbkdf2_sha256_verify(
    password: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
    expected: &[u8],
) -> bool {
    pbkdf2::verify(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, password, expected).is_ok()
}

/// Build validated Argon2id parameters with a 32-byte output.
pub fn argon2_params(
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
) -> Result<argon2::Params, StrongboxError> {
    argon2::Params::new(memory_kib, iterations, parallelism, Some(ENTRY_KEY_LEN))
        .map_err(|e| StrongboxError::Config(format!("invalid Argon2id parameters: {e}")))
}

/// Derive a 32-byte key from `password` using Argon2id.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn argon2id(
    password: &[u8],
    salt: &[u8],
    params: &argon2::Params,
) -> Result<Zeroizing<[u8; ENTRY_KEY_LEN]>, StrongboxError> {
    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params.clone(),
    );

    let mut output = Zeroizing::new([0u8; ENTRY_KEY_LEN]);
    argon2
        .hash_password_into(password, salt, output.as_mut())
        .map_err(|e| StrongboxError::Crypto(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_iterations() -> NonZeroU32 {
        NonZeroU32::new(1_000).unwrap()
    }

    fn cheap_argon2() -> argon2::Params {
        argon2_params(8, 1, 1).unwrap()
    }

    #[test]
    fn defaults_match_published_parameters() {
        let params = KdfParams::default();
        assert_eq!(params.salt, b"Oh My Gawd!!, I am Vedabahu!!!");
        assert!(params.pbkdf2_iterations >= 1_000_000);
        assert_eq!(params.pbkdf2_iterations, 1_200_000);
        assert_eq!(params.argon2_memory_kib, 32768);
        assert_eq!(params.argon2_iterations, 5);
        assert_eq!(params.argon2_parallelism, 4);
        assert!(argon2_params(
            params.argon2_memory_kib,
            params.argon2_iterations,
            params.argon2_parallelism
        )
        .is_ok());
    }

    #[test]
    fn pbkdf2_is_deterministic() {
        let a = pbkdf2_sha256(b"hunter2", FIXED_SALT, cheap_iterations());
        let b = pbkdf2_sha256(b"hunter2", FIXED_SALT, cheap_iterations());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn pbkdf2_verify_accepts_only_the_right_password() {
        let value = pbkdf2_sha256(b"right", FIXED_SALT, cheap_iterations());
        assert!(pbkdf2_sha256_verify(b"right", FIXED_SALT, cheap_iterations(), &value));
        assert!(!pbkdf2_sha256_verify(b"wrong", FIXED_SALT, cheap_iterations(), &value));
        assert!(!pbkdf2_sha256_verify(b"right", FIXED_SALT, cheap_iterations(), &value[..32]));
    }

    #[test]
    fn argon2id_is_deterministic_per_password() {
        let k1 = argon2id(b"pass", FIXED_SALT, &cheap_argon2()).unwrap();
        let k2 = argon2id(b"pass", FIXED_SALT, &cheap_argon2()).unwrap();
        let k3 = argon2id(b"other", FIXED_SALT, &cheap_argon2()).unwrap();
        assert_eq!(*k1, *k2);
        assert_ne!(*k1, *k3);
    }

    #[test]
    fn the_two_kdfs_disagree_on_the_same_input() {
        let verification = pbkdf2_sha256(b"shared", FIXED_SALT, cheap_iterations());
        let key = argon2id(b"shared", FIXED_SALT, &cheap_argon2()).unwrap();
        assert_ne!(&verification[..ENTRY_KEY_LEN], &key[..]);
    }

    #[test]
    fn argon2_params_rejects_zero_lanes() {
        assert!(matches!(
            argon2_params(32768, 5, 0),
            Err(StrongboxError::Config(_))
        ));
    }

    #[test]
    fn argon2id_rejects_short_salt() {
        let result = argon2id(b"pass", b"short", &cheap_argon2());
        assert!(matches!(result, Err(StrongboxError::Crypto(_))));
    }
}
