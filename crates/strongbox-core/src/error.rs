// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Strongbox credential vault.

use thiserror::Error;

/// The error type shared by the key manager, the vault store and the CLI.
///
/// The vault-level kinds (`NotInitialized`, `AlreadyInitialized`, `NotFound`,
/// `AuthenticationFailure`, `InvalidInput`) are distinct variants so callers
/// can print an actionable message instead of a generic failure.
#[derive(Debug, Error)]
pub enum StrongboxError {
    /// The vault file, its schema, or the master key record is missing.
    #[error("vault is not initialized -- run `strongbox init` first")]
    NotInitialized,

    /// A master key record already exists and would be overwritten.
    #[error("vault is already initialized")]
    AlreadyInitialized,

    /// No credential entry with the given identifier exists.
    #[error("no entry with id {id}")]
    NotFound { id: i64 },

    /// Wrong master password, or a ciphertext token failed its integrity check.
    #[error("authentication failed -- wrong master password or tampered data")]
    AuthenticationFailure,

    /// Caller-supplied input was rejected (empty password, zero length, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend errors (database open, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cipher or RNG setup failures that are not authentication failures.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrongboxError {
    /// Process exit status the CLI should use when this error ends a command.
    ///
    /// A missing entry, a repeated `init` and rejected input exit zero after
    /// printing their message. Everything else, including storage and crypto
    /// failures, exits non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            StrongboxError::NotFound { .. }
            | StrongboxError::AlreadyInitialized
            | StrongboxError::InvalidInput(_) => 0,
            _ => 1,
        }
    }
}

