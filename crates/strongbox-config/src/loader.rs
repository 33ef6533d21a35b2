// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./strongbox.toml` > `~/.config/strongbox/strongbox.toml` >
//! `/etc/strongbox/strongbox.toml` with environment variable overrides via `STRONGBOX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::{StrongboxConfig, SECTIONS};

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/strongbox/strongbox.toml";

/// Local (current directory) config file name.
pub const LOCAL_CONFIG_FILE: &str = "strongbox.toml";

/// `STRONGBOX_*` variables read by the CLI itself, never as config keys.
const RESERVED_ENV_VARS: &[&str] = &["master_password"];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Later layers win: compiled defaults, then each of
/// [`config_file_paths`], then `STRONGBOX_*` environment variables.
pub fn load_config() -> Result<StrongboxConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<StrongboxConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load configuration from one explicit file, still honouring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<StrongboxConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Path of the per-user config file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strongbox").join(LOCAL_CONFIG_FILE))
}

/// Config files in merge order, lowest precedence first. Missing files are skipped.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

/// The full layered Figment behind [`load_config`].
pub fn build_figment() -> Figment {
    config_file_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(StrongboxConfig::default()))
}

fn env_provider() -> Env {
    Env::prefixed("STRONGBOX_")
        .ignore(RESERVED_ENV_VARS)
        .map(|key| env_key(key.as_str()).into())
}

/// Map an env var suffix onto a dotted config key.
///
/// Only the section prefix is split off, so `STORAGE_DATABASE_PATH` becomes
/// `storage.database_path` rather than `storage.database.path`.
fn env_key(var: &str) -> String {
    let var = var.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|(section, _)| {
            var.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|key| format!("{section}.{key}"))
        })
        .unwrap_or(var)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_applies_overrides_on_top_of_defaults() {
        let config = load_config_from_str("[generator]\ndefault_length = 40\n").unwrap();
        assert_eq!(config.generator.default_length, 40);
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn env_key_splits_only_the_section() {
        assert_eq!(env_key("STORAGE_DATABASE_PATH"), "storage.database_path");
        assert_eq!(env_key("generator_default_length"), "generator.default_length");
        assert_eq!(env_key("GENERAL_LOG_LEVEL"), "general.log_level");
        assert_eq!(env_key("UNRELATED"), "unrelated");
    }

    #[test]
    fn file_layers_end_with_the_local_file() {
        let paths = config_file_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from(SYSTEM_CONFIG_PATH)));
        assert_eq!(paths.last(), Some(&PathBuf::from(LOCAL_CONFIG_FILE)));
    }

    #[test]
    fn from_missing_path_falls_back_to_defaults() {
        let config = load_config_from_path(Path::new("/nonexistent/strongbox.toml")).unwrap();
        assert_eq!(config.generator.default_length, 25);
    }
}
