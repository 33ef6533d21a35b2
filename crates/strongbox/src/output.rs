// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for entry listings and single decrypted entries.

use std::io::{self, Write};

use secrecy::ExposeSecret;
use strongbox_core::EntrySummary;
use strongbox_vault::DecryptedEntry;

const HEADERS: [&str; 3] = ["ID", "SERVICE", "WEBSITE"];

/// Render entries as an aligned three-column table.
pub fn write_entry_table(
    out: &mut impl Write,
    entries: &[EntrySummary],
    use_color: bool,
) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "The vault is empty. Add one with: strongbox add")?;
        return Ok(());
    }

    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|e| [e.id.to_string(), e.service.clone(), e.website.clone()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format!(
        "{:<w0$}  {:<w1$}  {:<w2$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    if use_color {
        use colored::Colorize;
        writeln!(out, "{}", header.trim_end().bold())?;
    } else {
        writeln!(out, "{}", header.trim_end())?;
    }
    writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 4))?;

    for row in &rows {
        let line = format!(
            "{:>w0$}  {:<w1$}  {:<w2$}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Render one decrypted entry as a labelled record.
pub fn write_entry(out: &mut impl Write, entry: &DecryptedEntry, use_color: bool) -> io::Result<()> {
    let fields = [
        ("ID", entry.id.to_string()),
        ("Service", entry.service.clone()),
        ("Website", entry.website.clone()),
        ("Username", entry.username.expose_secret().to_string()),
        ("Password", entry.password.expose_secret().to_string()),
    ];
    for (label, value) in fields {
        if use_color {
            use colored::Colorize;
            writeln!(out, "  {:<10}{}", format!("{label}:").bold(), value)?;
        } else {
            writeln!(out, "  {:<10}{}", format!("{label}:"), value)?;
        }
    }
    Ok(())
}
