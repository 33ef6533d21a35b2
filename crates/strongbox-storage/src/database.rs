// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped connection management for the vault file.
//!
//! Every store operation opens its own [`Connection`] and drops it before
//! returning, on success and error paths alike. No connection outlives a call.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use strongbox_core::StrongboxError;

/// Tables that must exist for the vault to count as initialized.
const REQUIRED_TABLES: &[&str] = &["master_password", "vault"];

/// How long a statement waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if needed) the vault file for schema initialization.
///
/// Missing parent directories are created first.
pub fn open_or_create(path: &Path) -> Result<Connection, StrongboxError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StrongboxError::Storage {
            source: Box::new(e),
        })?;
    }

    let conn = Connection::open(path).map_err(map_sql_err)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an existing, initialized vault file.
///
/// Never creates the file. A missing file or a file without the vault schema
/// yields [`StrongboxError::NotInitialized`].
pub fn open_existing(path: &Path) -> Result<Connection, StrongboxError> {
    if !path.exists() {
        return Err(StrongboxError::NotInitialized);
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(map_sql_err)?;
    configure(&conn)?;

    if !has_schema(&conn)? {
        return Err(StrongboxError::NotInitialized);
    }
    Ok(conn)
}

/// Whether both vault tables exist in the connected database.
pub fn has_schema(conn: &Connection) -> Result<bool, StrongboxError> {
    let mut stmt = conn
        .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .map_err(map_sql_err)?;
    for table in REQUIRED_TABLES {
        let count: i64 = stmt
            .query_row([table], |row| row.get(0))
            .map_err(map_sql_err)?;
        if count == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

fn configure(conn: &Connection) -> Result<(), StrongboxError> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(map_sql_err)
}

/// Convert rusqlite errors to StrongboxError::Storage.
pub fn map_sql_err(e: rusqlite::Error) -> StrongboxError {
    StrongboxError::Storage {
        source: Box::new(e),
    }
}
