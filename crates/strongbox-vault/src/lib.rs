// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key management and field encryption for the Strongbox credential vault.
//!
//! The master password is never stored. A PBKDF2-HMAC-SHA256 verification
//! value gates access, and a separate Argon2id key, derived afresh for each
//! operation, encrypts every credential field with AES-256-GCM.

pub mod crypto;
pub mod generator;
pub mod kdf;
pub mod keys;
pub mod prompt;
pub mod vault;

pub use generator::generate_password;
pub use kdf::KdfParams;
pub use keys::{EntryKey, KeyManager, Verification};
pub use prompt::{get_master_password, get_master_password_with_confirm, prompt_secret};
pub use vault::{DecryptedEntry, Vault};
