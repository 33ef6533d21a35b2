// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Strongbox credential vault.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use strongbox_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Vault file: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::StrongboxConfig;

/// Load configuration from the standard file hierarchy and validate it.
pub fn load_and_validate() -> Result<StrongboxConfig, Vec<ConfigError>> {
    finish(loader::load_config(), || {
        read_sources(&loader::config_file_paths())
    })
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<StrongboxConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_sources(&[path.to_path_buf()])
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<StrongboxConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a loaded config, or turn the load failure into diagnostics.
///
/// `sources` is only read on failure, to attach spans.
fn finish(
    loaded: Result<StrongboxConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<StrongboxConfig, Vec<ConfigError>> {
    let config =
        loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Contents of the config files that exist, named by absolute path as figment reports them.
fn read_sources(paths: &[PathBuf]) -> Vec<(String, String)> {
    paths
        .iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(path).ok()?;
            let name = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            Some((name.display().to_string(), content))
        })
        .collect()
}
