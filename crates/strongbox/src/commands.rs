// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for each `strongbox` subcommand.
//!
//! Handlers receive already-obtained master passwords so they can run
//! without a terminal in tests; prompting happens in `main`.

use std::io::Write;

use secrecy::SecretString;
use strongbox_core::StrongboxError;
use strongbox_vault::{generate_password, Vault};

use crate::output;

/// `strongbox init`: create the schema and set the master password.
pub fn run_init(
    vault: &Vault,
    master_password: &SecretString,
    out: &mut impl Write,
) -> Result<(), StrongboxError> {
    vault.create(master_password)?;
    writeln!(
        out,
        "Vault initialized at {}",
        vault.store().path().display()
    )
    .map_err(io_err)
}

/// Fields for a new entry, as collected from the command line.
pub struct NewEntry<'a> {
    pub service: &'a str,
    pub website: &'a str,
    pub username: &'a str,
    pub password: &'a SecretString,
}

/// `strongbox add`: encrypt and store a credential.
pub fn run_add(
    vault: &Vault,
    master_password: &SecretString,
    entry: NewEntry<'_>,
    out: &mut impl Write,
) -> Result<i64, StrongboxError> {
    let id = vault.add_entry(
        master_password,
        entry.service,
        entry.website,
        entry.username,
        entry.password,
    )?;
    writeln!(out, "Added entry {id} ({})", entry.service).map_err(io_err)?;
    Ok(id)
}

/// `strongbox list`: print every entry without decrypting anything.
pub fn run_list(vault: &Vault, out: &mut impl Write, use_color: bool) -> Result<(), StrongboxError> {
    let entries = vault.list_entries()?;
    output::write_entry_table(out, &entries, use_color).map_err(io_err)
}

/// `strongbox view <ID>`: decrypt and print one entry.
pub fn run_view(
    vault: &Vault,
    master_password: &SecretString,
    id: i64,
    out: &mut impl Write,
    use_color: bool,
) -> Result<(), StrongboxError> {
    let entry = vault.view_entry(master_password, id)?;
    output::write_entry(out, &entry, use_color).map_err(io_err)
}

/// `strongbox remove <ID>`: delete one entry.
pub fn run_remove(
    vault: &Vault,
    master_password: &SecretString,
    id: i64,
    out: &mut impl Write,
) -> Result<(), StrongboxError> {
    vault.remove_entry(master_password, id)?;
    writeln!(out, "Removed entry {id}").map_err(io_err)
}

/// `strongbox generate`: print a random password.
pub fn run_generate(length: usize, out: &mut impl Write) -> Result<String, StrongboxError> {
    let password = generate_password(length)?;
    writeln!(out, "{password}").map_err(io_err)?;
    Ok(password)
}

fn io_err(e: std::io::Error) -> StrongboxError {
    StrongboxError::Internal(format!("failed to write output: {e}"))
}
