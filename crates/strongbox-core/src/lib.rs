// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Strongbox credential vault.
//!
//! Holds the error type and the record types passed between the key manager,
//! the vault store and the command-line front end.

pub mod error;
pub mod types;

pub use error::StrongboxError;
pub use types::{EntrySummary, VaultEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongbox_error_has_all_variants() {
        let _not_init = StrongboxError::NotInitialized;
        let _already = StrongboxError::AlreadyInitialized;
        let _not_found = StrongboxError::NotFound { id: 1 };
        let _auth = StrongboxError::AuthenticationFailure;
        let _input = StrongboxError::InvalidInput("test".into());
        let _storage = StrongboxError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _crypto = StrongboxError::Crypto("test".into());
        let _config = StrongboxError::Config("test".into());
        let _internal = StrongboxError::Internal("test".into());
    }

    #[test]
    fn exit_code_is_zero_only_for_caller_mistakes() {
        assert_eq!(StrongboxError::NotFound { id: 7 }.exit_code(), 0);
        assert_eq!(StrongboxError::AlreadyInitialized.exit_code(), 0);
        assert_eq!(StrongboxError::InvalidInput("x".into()).exit_code(), 0);

        assert_eq!(StrongboxError::AuthenticationFailure.exit_code(), 1);
        assert_eq!(StrongboxError::NotInitialized.exit_code(), 1);
        let storage = StrongboxError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert_eq!(storage.exit_code(), 1);
        assert_eq!(StrongboxError::Crypto("rng".into()).exit_code(), 1);
        assert_eq!(StrongboxError::Config("bad".into()).exit_code(), 1);
        assert_eq!(StrongboxError::Internal("bug".into()).exit_code(), 1);
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = StrongboxError::NotFound { id: 42 };
        assert_eq!(err.to_string(), "no entry with id 42");
    }
}
