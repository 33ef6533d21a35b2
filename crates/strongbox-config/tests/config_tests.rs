// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Strongbox configuration system.

use serial_test::serial;
use tempfile::tempdir;
use strongbox_config::diagnostic::ConfigError;
use strongbox_config::model::StrongboxConfig;
use strongbox_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_strongbox_config() {
    let toml = r#"
[general]
log_level = "debug"

[storage]
database_path = "/tmp/strongbox-test.db"

[generator]
default_length = 32
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/strongbox-test.db");
    assert_eq!(config.generator.default_length, 32);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.general.log_level, "warn");
    assert_eq!(config.generator.default_length, 25);
    assert!(config.storage.database_path.ends_with("vault.db"));
}

/// Unknown field in [storage] is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_storage_produces_error() {
    let toml = r#"
[storage]
databse_path = "x.db"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("databse_path"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// KDF parameters cannot be set from config.
#[test]
fn kdf_section_is_rejected() {
    let toml = r#"
[kdf]
iterations = 1
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Unknown key produces an UnknownKey diagnostic with a suggestion and the valid keys.
#[test]
fn diagnostic_error_includes_suggestion_and_valid_keys() {
    let toml = r#"
[generator]
default_lenght = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "generator.default_lenght"
                && suggestion.as_deref() == Some("default_length")
                && valid_keys.contains("default_length")
        })
    });
    assert!(has_unknown_key, "expected UnknownKey diagnostic, got: {errors:?}");
}

/// Wrong value type produces an error naming the problem.
#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[generator]
default_length = "long"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("default_length"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// Validation runs after a successful parse.
#[test]
fn validation_rejects_zero_length_and_bad_level() {
    let toml = r#"
[general]
log_level = "chatty"

[generator]
default_length = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "storage.databse_path".to_string(),
        suggestion: Some("database_path".to_string()),
        valid_keys: "database_path".to_string(),
        span: None,
        src: None,
    };

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("databse_path"));
}

/// A mistyped key in an explicit file points at the offending line.
#[test]
#[serial]
fn explicit_path_errors_carry_a_source_span() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strongbox.toml");
    std::fs::write(&path, "[storage]\ndatabse_path = \"/srv/vault.db\"\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("typo should be rejected");
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { span: Some(_), src: Some(_), .. }
        )),
        "expected a located UnknownKey, got: {errors:?}"
    );
}

/// An explicit config file is honoured.
#[test]
#[serial]
fn explicit_path_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strongbox.toml");
    std::fs::write(&path, "[storage]\ndatabase_path = \"/srv/vault.db\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should load");
    assert_eq!(config.storage.database_path, "/srv/vault.db");
}

/// STRONGBOX_STORAGE_DATABASE_PATH maps to storage.database_path, and the
/// master password variable is not mistaken for a config key.
#[test]
#[serial]
fn env_vars_override_file_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strongbox.toml");
    std::fs::write(&path, "[storage]\ndatabase_path = \"/from/file.db\"\n").unwrap();

    // SAFETY: test-only env mutation, serialized with #[serial].
    unsafe {
        std::env::set_var("STRONGBOX_STORAGE_DATABASE_PATH", "/from/env.db");
        std::env::set_var("STRONGBOX_MASTER_PASSWORD", "not-a-config-key");
    }
    let result = load_and_validate_path(&path);
    unsafe {
        std::env::remove_var("STRONGBOX_STORAGE_DATABASE_PATH");
        std::env::remove_var("STRONGBOX_MASTER_PASSWORD");
    }

    let config = result.expect("env override should load");
    assert_eq!(config.storage.database_path, "/from/env.db");
}

/// Serialized defaults round through figment unchanged.
#[test]
fn serialized_defaults_are_sensible() {
    let config = StrongboxConfig::default();
    assert_eq!(config.general.log_level, "warn");
    assert_eq!(config.generator.default_length, 25);
    assert!(!config.storage.database_path.is_empty());
}
