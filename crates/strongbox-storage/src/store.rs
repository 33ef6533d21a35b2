// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault store: schema setup and CRUD for the master key record and
//! credential entries.
//!
//! The store persists credential fields as opaque byte blobs and never sees
//! plaintext. Each operation acquires a connection for its own duration and
//! commits before returning.

use std::path::{Path, PathBuf};

use rusqlite::{params, TransactionBehavior};
use strongbox_config::model::StorageConfig;
use strongbox_core::{EntrySummary, StrongboxError, VaultEntry};
use tracing::{debug, info};

use crate::database::{self, map_sql_err};
use crate::migrations;

/// Handle to one vault file.
///
/// Holds only the location; connections are opened per operation.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    /// Create a store for the vault file at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the configured vault location.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path())
    }

    /// Location of the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the master key and credential tables if absent.
    ///
    /// Idempotent: on an already initialized vault this is a no-op.
    pub fn initialize(&self) -> Result<(), StrongboxError> {
        let mut conn = database::open_or_create(&self.path)?;
        migrations::run_migrations(&mut conn)?;
        debug!(path = %self.path.display(), "vault schema ready");
        Ok(())
    }

    /// Whether a master key record exists.
    ///
    /// A missing file or schema reports `false` rather than an error.
    pub fn is_initialized(&self) -> Result<bool, StrongboxError> {
        let conn = match database::open_existing(&self.path) {
            Ok(conn) => conn,
            Err(StrongboxError::NotInitialized) => return Ok(false),
            Err(e) => return Err(e),
        };
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM master_password", [], |row| row.get(0))
            .map_err(map_sql_err)?;
        Ok(count > 0)
    }

    /// Insert the master key record (the verification value).
    ///
    /// Fails with [`StrongboxError::AlreadyInitialized`] when a record exists;
    /// the existence check and insert run in one immediate transaction.
    pub fn set_master_key(&self, hash: &[u8]) -> Result<(), StrongboxError> {
        if hash.is_empty() {
            return Err(StrongboxError::InvalidInput(
                "master key hash must not be empty".to_string(),
            ));
        }

        let mut conn = database::open_existing(&self.path)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_sql_err)?;

        let existing: i64 = tx
            .query_row("SELECT COUNT(*) FROM master_password", [], |row| row.get(0))
            .map_err(map_sql_err)?;
        if existing > 0 {
            return Err(StrongboxError::AlreadyInitialized);
        }

        tx.execute(
            "INSERT INTO master_password (hash) VALUES (?1)",
            params![hash],
        )
        .map_err(map_sql_err)?;
        tx.commit().map_err(map_sql_err)?;

        info!(path = %self.path.display(), "master key record stored");
        Ok(())
    }

    /// Read the stored verification value.
    pub fn get_master_key(&self) -> Result<Vec<u8>, StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        let result = conn.query_row("SELECT hash FROM master_password LIMIT 1", [], |row| {
            row.get::<_, Vec<u8>>(0)
        });
        match result {
            Ok(hash) => Ok(hash),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StrongboxError::NotInitialized),
            Err(e) => Err(map_sql_err(e)),
        }
    }

    /// Insert a credential entry and return its assigned identifier.
    pub fn add_entry(
        &self,
        service: &str,
        website: &str,
        encrypted_username: &[u8],
        encrypted_password: &[u8],
    ) -> Result<i64, StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        conn.execute(
            "INSERT INTO vault (service, website, username, password) VALUES (?1, ?2, ?3, ?4)",
            params![service, website, encrypted_username, encrypted_password],
        )
        .map_err(map_sql_err)?;
        let id = conn.last_insert_rowid();

        debug!(id, service = %service, "entry added");
        Ok(id)
    }

    /// Delete the entry with the given identifier.
    ///
    /// Deleting an id that does not exist is an error, not a silent success.
    pub fn remove_entry(&self, id: i64) -> Result<(), StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        let deleted = conn
            .execute("DELETE FROM vault WHERE id = ?1", params![id])
            .map_err(map_sql_err)?;
        if deleted == 0 {
            return Err(StrongboxError::NotFound { id });
        }

        debug!(id, "entry removed");
        Ok(())
    }

    /// Fetch one entry, ciphertext included.
    pub fn get_entry(&self, id: i64) -> Result<VaultEntry, StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        let result = conn.query_row(
            "SELECT id, service, website, username, password FROM vault WHERE id = ?1",
            params![id],
            |row| {
                Ok(VaultEntry {
                    id: row.get(0)?,
                    service: row.get(1)?,
                    website: row.get(2)?,
                    encrypted_username: row.get(3)?,
                    encrypted_password: row.get(4)?,
                })
            },
        );
        match result {
            Ok(entry) => Ok(entry),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StrongboxError::NotFound { id }),
            Err(e) => Err(map_sql_err(e)),
        }
    }

    /// List every entry as `(id, service, website)`, ordered by id ascending.
    pub fn list_entries(&self) -> Result<Vec<EntrySummary>, StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        let mut stmt = conn
            .prepare("SELECT id, service, website FROM vault ORDER BY id ASC")
            .map_err(map_sql_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EntrySummary {
                    id: row.get(0)?,
                    service: row.get(1)?,
                    website: row.get(2)?,
                })
            })
            .map_err(map_sql_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(map_sql_err)?);
        }
        Ok(entries)
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> Result<u64, StrongboxError> {
        let conn = database::open_existing(&self.path)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM vault", [], |row| row.get(0))
            .map_err(map_sql_err)?;
        Ok(count as u64)
    }
}
