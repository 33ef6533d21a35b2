// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types shared between the vault store and its callers.

/// One stored credential as persisted in the `vault` table.
///
/// `service` and `website` are plaintext labels. The two credential fields are
/// opaque authenticated-encryption tokens; the store never sees plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub id: i64,
    pub service: String,
    pub website: String,
    pub encrypted_username: Vec<u8>,
    pub encrypted_password: Vec<u8>,
}

/// The `(id, service, website)` triple returned when listing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub id: i64,
    pub service: String,
    pub website: String,
}
