// src/core/vault.rs
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::crypto::{self, CryptoError, SecretKey};
use crate::models::SavedPassword;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("No password saved under label '{0}'")]
    NotFound(String),

    #[error("Could not decrypt the password saved under '{label}': {source}")]
    DecryptionFailed {
        label: String,
        #[source]
        source: CryptoError,
    },

    #[error("Persistence error: {0}")]
    PersistenceError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encryption error: {0}")]
    Encryption(#[from] CryptoError),

    #[error("Invalid key file {path}: {reason}")]
    InvalidKey { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, VaultError>;

// On-disk document: label -> encrypted token
type Document = BTreeMap<String, String>;

/// Label to password store, encrypted at rest with a single symmetric key.
///
/// The whole file is read on every access and rewritten on every change. There is
/// no locking: two processes saving at once lose one of the updates.
pub struct Vault {
    store_path: PathBuf,
    key: SecretKey,
}

impl Vault {
    pub fn new(store_path: impl Into<PathBuf>, key: SecretKey) -> Self {
        Self {
            store_path: store_path.into(),
            key,
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Encrypt `password` and save it under `label`, replacing any previous entry.
    pub fn put(&self, label: &str, password: &str) -> Result<()> {
        let token = crypto::encrypt_password(&self.key, password)?;

        let mut document = self.load()?;
        let replaced = document.insert(label.to_string(), token).is_some();
        self.save(&document)?;

        if replaced {
            log::info!("Replaced saved password for label '{}'", label);
        } else {
            log::info!("Saved password for label '{}'", label);
        }
        Ok(())
    }

    pub fn get(&self, label: &str) -> Result<String> {
        self.get_entry(label).map(|entry| entry.password)
    }

    /// Decrypted entry along with the time it was saved.
    pub fn get_entry(&self, label: &str) -> Result<SavedPassword> {
        let document = self.load()?;
        let token = document
            .get(label)
            .ok_or_else(|| VaultError::NotFound(label.to_string()))?;

        let password = crypto::decrypt_password(&self.key, token).map_err(|source| {
            log::warn!("Failed to decrypt entry '{}'", label);
            VaultError::DecryptionFailed {
                label: label.to_string(),
                source,
            }
        })?;

        Ok(SavedPassword {
            label: label.to_string(),
            password,
            saved_at: crypto::token_timestamp(token).ok(),
        })
    }

    /// Labels currently in the store, sorted.
    pub fn labels(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    // A missing or unparseable store is treated as empty. Anything else is an error.
    fn load(&self) -> Result<Document> {
        let bytes = match fs::read(&self.store_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Store {} not found, starting empty", self.store_path.display());
                return Ok(Document::new());
            }
            Err(e) => return Err(VaultError::PersistenceError(e)),
        };

        match serde_json::from_slice::<Document>(&bytes) {
            Ok(document) => {
                log::debug!("Loaded {} entries from {}", document.len(), self.store_path.display());
                Ok(document)
            }
            Err(e) => {
                log::warn!(
                    "Store {} is not a valid label map ({}), treating it as empty",
                    self.store_path.display(),
                    e
                );
                Ok(Document::new())
            }
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let mut json = serde_json::to_string_pretty(document)?;
        json.push('\n');
        crate::utils::write_replace(&self.store_path, json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn vault_in(dir: &Path) -> Vault {
        Vault::new(dir.join("passwords.json"), SecretKey::generate())
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());

        vault.put("email", "Str0ng!Pass12").unwrap();

        assert_eq!(vault.get("email").unwrap(), "Str0ng!Pass12");
    }

    #[test]
    fn test_missing_label_is_not_found() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        vault.put("email", "secret").unwrap();

        let err = vault.get("bank").unwrap_err();
        assert!(matches!(err, VaultError::NotFound(label) if label == "bank"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());

        assert!(matches!(vault.get("anything"), Err(VaultError::NotFound(_))));
        assert!(vault.labels().unwrap().is_empty());
    }

    #[test]
    fn test_second_put_wins() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());

        vault.put("email", "first").unwrap();
        vault.put("email", "second").unwrap();

        assert_eq!(vault.get("email").unwrap(), "second");
        assert_eq!(vault.labels().unwrap(), vec!["email".to_string()]);
    }

    #[test]
    fn test_entries_survive_a_new_vault_with_the_same_key() {
        let dir = tempdir().unwrap();
        let key = SecretKey::generate();
        let path = dir.path().join("passwords.json");

        Vault::new(&path, key.clone()).put("email", "secret").unwrap();
        Vault::new(&path, key.clone()).put("bank", "other").unwrap();

        let reopened = Vault::new(&path, key);
        assert_eq!(reopened.get("email").unwrap(), "secret");
        assert_eq!(reopened.get("bank").unwrap(), "other");
        assert_eq!(reopened.labels().unwrap(), vec!["bank".to_string(), "email".to_string()]);
    }

    #[test]
    fn test_wrong_key_is_decryption_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passwords.json");
        Vault::new(&path, SecretKey::generate()).put("email", "secret").unwrap();

        let other = Vault::new(&path, SecretKey::generate());
        let err = other.get("email").unwrap_err();
        assert!(matches!(err, VaultError::DecryptionFailed { .. }));
    }

    #[test]
    fn test_corrupted_token_is_decryption_failure() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        fs::write(vault.store_path(), r#"{"email": "definitely-not-a-token"}"#).unwrap();

        assert!(matches!(vault.get("email"), Err(VaultError::DecryptionFailed { .. })));
    }

    #[test]
    fn test_corrupt_store_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        fs::write(vault.store_path(), "{ this is not json").unwrap();

        assert!(matches!(vault.get("email"), Err(VaultError::NotFound(_))));

        vault.put("email", "secret").unwrap();
        assert_eq!(vault.get("email").unwrap(), "secret");
    }

    #[test]
    fn test_non_object_store_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        fs::write(vault.store_path(), "[1, 2, 3]").unwrap();

        assert!(vault.labels().unwrap().is_empty());
    }

    #[test]
    fn test_store_file_is_pretty_json_without_plaintext() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        vault.put("email", "PLAINTEXT_MARKER").unwrap();

        let contents = fs::read_to_string(vault.store_path()).unwrap();
        assert!(!contents.contains("PLAINTEXT_MARKER"));
        assert!(contents.contains("\n  \"email\": "));

        let parsed: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_get_entry_reports_saved_time() {
        let dir = tempdir().unwrap();
        let vault = vault_in(dir.path());
        let before = chrono::Utc::now().timestamp();
        vault.put("email", "secret").unwrap();

        let entry = vault.get_entry("email").unwrap();
        assert_eq!(entry.label, "email");
        assert_eq!(entry.password, "secret");
        assert!(entry.saved_at.unwrap().timestamp() >= before);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_store_is_persistence_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be cannot be read as a file
        let vault = Vault::new(dir.path(), SecretKey::generate());

        assert!(matches!(vault.get("email"), Err(VaultError::PersistenceError(_))));
    }
}
