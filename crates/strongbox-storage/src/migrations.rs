// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Each migration is applied inside one transaction
//! together with its history row, so an interrupted `initialize()` leaves
//! either no tables or both.

use strongbox_core::StrongboxError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table,
/// so running this on an up-to-date vault is a no-op.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), StrongboxError> {
    embedded::migrations::runner().run(conn).map_err(|e| StrongboxError::Storage {
        source: Box::new(e),
    })?;
    Ok(())
}
