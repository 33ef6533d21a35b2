// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master password acquisition via TTY prompt or STRONGBOX_MASTER_PASSWORD environment variable.

use secrecy::SecretString;
use strongbox_core::StrongboxError;

/// The environment variable name for providing the master password.
pub const MASTER_PASSWORD_ENV_VAR: &str = "STRONGBOX_MASTER_PASSWORD";

/// Get the master password from the environment or an interactive TTY prompt.
///
/// Priority:
/// 1. `STRONGBOX_MASTER_PASSWORD` environment variable (for scripting)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_master_password() -> Result<SecretString, StrongboxError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return read_hidden("Master password: ");
    }

    Err(no_password())
}

/// Get a new master password with a confirmation prompt (for `strongbox init`).
///
/// The environment variable needs no confirmation.
pub fn get_master_password_with_confirm() -> Result<SecretString, StrongboxError> {
    if let Some(password) = from_env() {
        return Ok(password);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let first = read_raw("New master password: ")?;
        let second = read_raw("Confirm master password: ")?;
        if first != second {
            return Err(StrongboxError::InvalidInput(
                "passwords do not match".to_string(),
            ));
        }
        return into_secret(first);
    }

    Err(no_password())
}

/// Prompt for any other hidden value, such as an entry password.
pub fn prompt_secret(prompt: &str) -> Result<SecretString, StrongboxError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(StrongboxError::InvalidInput(format!(
            "cannot prompt for `{}` without a terminal",
            prompt.trim_end_matches([':', ' '])
        )));
    }
    read_hidden(prompt)
}

fn from_env() -> Option<SecretString> {
    std::env::var(MASTER_PASSWORD_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

fn read_hidden(prompt: &str) -> Result<SecretString, StrongboxError> {
    into_secret(read_raw(prompt)?)
}

fn read_raw(prompt: &str) -> Result<String, StrongboxError> {
    rpassword::prompt_password(prompt)
        .map_err(|e| StrongboxError::Internal(format!("failed to read password: {e}")))
}

fn into_secret(value: String) -> Result<SecretString, StrongboxError> {
    if value.is_empty() {
        return Err(StrongboxError::InvalidInput(
            "empty password not allowed".to_string(),
        ));
    }
    Ok(SecretString::from(value))
}

fn no_password() -> StrongboxError {
    StrongboxError::InvalidInput(format!(
        "no master password provided. Set {MASTER_PASSWORD_ENV_VAR} or run interactively."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn get_password_from_env_var() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "from-env") };
        let result = get_master_password();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "from-env");
    }

    #[test]
    #[serial]
    fn confirm_variant_accepts_env_var() {
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "from-env") };
        let result = get_master_password_with_confirm();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn empty_env_var_is_ignored() {
        unsafe { std::env::set_var(MASTER_PASSWORD_ENV_VAR, "") };
        // In CI/test, stdin is not a terminal, so this will fail.
        let result = get_master_password();
        unsafe { std::env::remove_var(MASTER_PASSWORD_ENV_VAR) };

        assert!(matches!(result, Err(StrongboxError::InvalidInput(_))));
    }

    #[test]
    fn empty_prompt_answer_is_rejected() {
        assert!(matches!(
            into_secret(String::new()),
            Err(StrongboxError::InvalidInput(_))
        ));
    }
}
