// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Strongbox credential vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.
//!
//! Key derivation parameters are deliberately absent: changing them would
//! make every existing vault unreadable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Every config section with the keys it accepts, in file order.
///
/// Must stay in step with the structs below.
pub const SECTIONS: &[(&str, &[&str])] = &[
    ("general", &["log_level"]),
    ("storage", &["database_path"]),
    ("generator", &["default_length"]),
];

/// Keys accepted by one section, or `None` for an unknown section.
pub fn section_keys(section: &str) -> Option<&'static [&'static str]> {
    SECTIONS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, keys)| *keys)
}

/// Top-level Strongbox configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StrongboxConfig {
    /// Process-wide settings such as log verbosity.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Location of the vault file.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Password generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Vault file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite vault file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl StorageConfig {
    /// The configured vault location as a path.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("strongbox").join("vault.db").display().to_string())
        .unwrap_or_else(|| "vault.db".to_string())
}

/// Password generator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Length used by `strongbox generate` when `--length` is not given.
    #[serde(default = "default_generator_length")]
    pub default_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_length: default_generator_length(),
        }
    }
}

fn default_generator_length() -> usize {
    25
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{providers::Serialized, Figment};

    #[test]
    fn section_table_matches_serialized_defaults() {
        let figment = Figment::from(Serialized::defaults(StrongboxConfig::default()));
        for (section, keys) in SECTIONS {
            for key in *keys {
                assert!(
                    figment.find_value(&format!("{section}.{key}")).is_ok(),
                    "{section}.{key} is not a config field"
                );
            }
        }
    }

    #[test]
    fn section_keys_lookup() {
        assert_eq!(section_keys("storage"), Some(&["database_path"][..]));
        assert_eq!(section_keys("kdf"), None);
    }
}
