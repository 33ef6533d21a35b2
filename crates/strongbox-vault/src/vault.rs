// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle: create, unlock, add, view, list and remove credentials.
//!
//! Every password-gated operation follows the same flow:
//! - read the master key record from the store,
//! - verify the candidate master password against it,
//! - derive an entry key for this one operation and drop it afterwards.
//!
//! The store only ever receives ciphertext tokens.

use secrecy::{ExposeSecret, SecretString};
use strongbox_config::StrongboxConfig;
use strongbox_core::{EntrySummary, StrongboxError};
use strongbox_storage::VaultStore;
use tracing::{debug, info, warn};

use crate::kdf::KdfParams;
use crate::keys::{KeyManager, Verification};

/// A credential with its fields decrypted.
#[derive(Debug)]
pub struct DecryptedEntry {
    pub id: i64,
    pub service: String,
    pub website: String,
    pub username: SecretString,
    pub password: SecretString,
}

/// The key manager and vault store wired together.
pub struct Vault {
    store: VaultStore,
    keys: KeyManager,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.store.path())
            .field("keys", &self.keys)
            .finish()
    }
}

impl Vault {
    pub fn new(store: VaultStore, keys: KeyManager) -> Self {
        Self { store, keys }
    }

    /// Build a vault for the configured location with the fixed KDF parameters.
    pub fn from_config(config: &StrongboxConfig) -> Result<Self, StrongboxError> {
        Ok(Self::new(
            VaultStore::from_config(&config.storage),
            KeyManager::new(KdfParams::default())?,
        ))
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    /// Whether the vault has a master password set.
    pub fn exists(&self) -> Result<bool, StrongboxError> {
        self.store.is_initialized()
    }

    /// Create the schema and store the master password verification value.
    pub fn create(&self, master_password: &SecretString) -> Result<(), StrongboxError> {
        self.store.initialize()?;
        // Fail before the slow derivation; set_master_key re-checks atomically.
        if self.store.is_initialized()? {
            return Err(StrongboxError::AlreadyInitialized);
        }

        let verification = self.keys.derive_verification_value(master_password)?;
        self.store.set_master_key(&verification)?;

        info!(path = %self.store.path().display(), "vault created");
        Ok(())
    }

    /// Check the master password against the stored verification value.
    ///
    /// An empty candidate is [`StrongboxError::InvalidInput`]. Storage errors
    /// propagate unchanged; only a genuine mismatch or a malformed record
    /// becomes [`StrongboxError::AuthenticationFailure`].
    pub fn unlock(&self, master_password: &SecretString) -> Result<(), StrongboxError> {
        if master_password.expose_secret().is_empty() {
            return Err(StrongboxError::InvalidInput(
                "master password must not be empty".to_string(),
            ));
        }

        let stored = self.store.get_master_key()?;
        match self.keys.check(master_password, &stored) {
            Verification::Match => {
                debug!("master password verified");
                Ok(())
            }
            Verification::Mismatch => Err(StrongboxError::AuthenticationFailure),
            Verification::Malformed => {
                warn!(len = stored.len(), "stored verification value is malformed");
                Err(StrongboxError::AuthenticationFailure)
            }
        }
    }

    /// Encrypt and store a new credential, returning its identifier.
    pub fn add_entry(
        &self,
        master_password: &SecretString,
        service: &str,
        website: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<i64, StrongboxError> {
        require("service", service)?;
        require("website", website)?;
        require("username", username)?;
        require("password", password.expose_secret())?;

        self.unlock(master_password)?;

        let key = self.keys.derive_entry_key(master_password)?;
        let encrypted_username = self.keys.encrypt_field(username.as_bytes(), &key)?;
        let encrypted_password = self
            .keys
            .encrypt_field(password.expose_secret().as_bytes(), &key)?;
        drop(key);

        self.store
            .add_entry(service, website, &encrypted_username, &encrypted_password)
    }

    /// Fetch and decrypt one credential.
    pub fn view_entry(
        &self,
        master_password: &SecretString,
        id: i64,
    ) -> Result<DecryptedEntry, StrongboxError> {
        self.unlock(master_password)?;
        let entry = self.store.get_entry(id)?;

        let key = self.keys.derive_entry_key(master_password)?;
        let username = self.keys.decrypt_field(&entry.encrypted_username, &key)?;
        let password = self.keys.decrypt_field(&entry.encrypted_password, &key)?;
        drop(key);

        debug!(id, "entry decrypted");
        Ok(DecryptedEntry {
            id: entry.id,
            service: entry.service,
            website: entry.website,
            username: utf8_secret(&username)?,
            password: utf8_secret(&password)?,
        })
    }

    /// Delete one credential after verifying the master password.
    pub fn remove_entry(&self, master_password: &SecretString, id: i64) -> Result<(), StrongboxError> {
        self.unlock(master_password)?;
        self.store.remove_entry(id)
    }

    /// List `(id, service, website)` for every credential. Nothing is decrypted.
    pub fn list_entries(&self) -> Result<Vec<EntrySummary>, StrongboxError> {
        self.store.list_entries()
    }
}

fn require(field: &str, value: &str) -> Result<(), StrongboxError> {
    if value.trim().is_empty() {
        return Err(StrongboxError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn utf8_secret(bytes: &[u8]) -> Result<SecretString, StrongboxError> {
    let value = std::str::from_utf8(bytes)
        .map_err(|e| StrongboxError::Crypto(format!("decrypted field is not valid UTF-8: {e}")))?;
    Ok(SecretString::from(value.to_string()))
}
