// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Strongbox credential vault.
//!
//! One vault file holds two tables: `master_password` (zero or one row with
//! the master password verification value) and `vault` (the encrypted
//! credential entries). Schema creation uses embedded migrations; every
//! operation opens a short-lived connection and commits before returning.

pub mod database;
pub mod migrations;
pub mod store;

pub use store::VaultStore;
