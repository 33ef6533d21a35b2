// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config errors as miette diagnostics.
//!
//! The config file has three small sections listed in [`SECTIONS`], so every
//! name a user can mistype is known up front. Unknown sections and keys get a
//! suggestion from that table, and when the offending TOML text is available
//! the diagnostic points at the line.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

use crate::model::{section_keys, SECTIONS};

/// Minimum Jaro-Winkler score for a suggestion (`databse_path` -> `database_path`).
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem with the loaded configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A section or key strongbox does not read.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(strongbox::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// Dotted name as written, e.g. `storage.databse_path`.
        key: String,
        /// Closest valid name in the same section.
        suggestion: Option<String>,
        /// Comma-separated names that are accepted at that level.
        valid_keys: String,
        #[label("not a strongbox setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A known key holding the wrong kind of value, e.g. a quoted length.
    #[error("bad value for `{key}`: found {found}")]
    #[diagnostic(code(strongbox::config::bad_value), help("`{key}` expects {expected}"))]
    BadValue {
        key: String,
        found: String,
        expected: String,
        #[label("wrong kind of value")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// The file is not valid TOML or could not be read.
    #[error("unreadable configuration: {message}")]
    #[diagnostic(
        code(strongbox::config::unreadable),
        help("check the TOML syntax of your strongbox.toml")
    )]
    Unreadable { message: String },

    /// The file parsed but a value failed a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(strongbox::config::validation))]
    Validation { message: String },
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid here: {valid_keys}"),
        None => format!("valid here: {valid_keys}"),
    }
}

/// Convert every error inside a `figment::Error` into a [`ConfigError`].
///
/// `sources` pairs a file name with its contents and is only used to attach
/// source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter().map(|error| convert(&error, sources)).collect()
}

fn convert(error: &figment::Error, sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, _) => unknown_key(error, field, sources),
        Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
            bad_value(error, actual.to_string(), expected.clone(), sources)
        }
        Kind::ISizeOutOfRange(n) => {
            bad_value(error, n.to_string(), "a positive whole number".to_string(), sources)
        }
        Kind::USizeOutOfRange(n) => {
            bad_value(error, n.to_string(), "a smaller whole number".to_string(), sources)
        }
        _ => ConfigError::Unreadable {
            message: error.to_string(),
        },
    }
}

fn unknown_key(error: &figment::Error, field: &str, sources: &[(String, String)]) -> ConfigError {
    let section = known_section(&error.path, field);
    let valid: Vec<&str> = match section.and_then(section_keys) {
        Some(keys) => keys.to_vec(),
        None => SECTIONS.iter().map(|(name, _)| *name).collect(),
    };
    let (span, src) = locate(error, sources, section, field);

    ConfigError::UnknownKey {
        key: dotted(section, field),
        suggestion: suggest_key(field, &valid),
        valid_keys: valid.join(", "),
        span,
        src,
    }
}

fn bad_value(
    error: &figment::Error,
    found: String,
    expected: String,
    sources: &[(String, String)],
) -> ConfigError {
    let field = error.path.last().map(String::as_str).unwrap_or_default();
    let section = known_section(&error.path, field);
    let (span, src) = locate(error, sources, section, field);

    ConfigError::BadValue {
        key: dotted(section, field),
        found,
        expected,
        span,
        src,
    }
}

/// The strongbox section an error path points into, if any.
fn known_section<'a>(path: &'a [String], field: &str) -> Option<&'a str> {
    path.iter()
        .map(String::as_str)
        .find(|part| *part != field && section_keys(part).is_some())
}

fn dotted(section: Option<&str>, field: &str) -> String {
    match section {
        Some(section) => format!("{section}.{field}"),
        None => field.to_string(),
    }
}

fn locate(
    error: &figment::Error,
    sources: &[(String, String)],
    section: Option<&str>,
    field: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some((name, content)) = source_for(error, sources) else {
        return (None, None);
    };
    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// The TOML text an error came from: the file figment names, or the only
/// source given when the error came from an inline string.
fn source_for<'a>(
    error: &figment::Error,
    sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    file.and_then(|path| sources.iter().find(|(name, _)| *name == path))
        .or_else(|| match sources {
            [only] => Some(only),
            _ => None,
        })
}

/// Byte offset of `key` inside `[section]`, or of a top-level `key`.
///
/// With `section == None` a `[key]` header also matches, which is how an
/// unknown section is reported.
pub fn find_key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let code = line.split_once('#').map_or(line, |(code, _)| code);
        let trimmed = code.trim();

        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            let name = header.trim();
            if section.is_none() && name == key {
                return line.find(name).map(|col| offset + col);
            }
            current = Some(name);
        } else if current == section {
            let is_key = trimmed
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            if is_key {
                return Some(offset + (line.len() - line.trim_start().len()));
            }
        }

        offset += line.len();
    }

    None
}

/// Closest candidate to `unknown` by Jaro-Winkler similarity, if close enough.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Print each error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
