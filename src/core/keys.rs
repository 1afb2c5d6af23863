// src/core/keys.rs
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::core::vault::{Result, VaultError};
use crate::crypto::SecretKey;

/// Load the key at `path`, creating it first if the file doesn't exist.
///
/// Anyone able to read this file can decrypt every saved password, so a new key
/// file is created readable by its owner only. An existing key file that cannot be
/// parsed is an error; it is never replaced.
pub fn ensure_key(path: &Path) -> Result<SecretKey> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            warn_if_shared(path);
            log::debug!("Loaded encryption key from {}", path.display());
            parse_key(path, &contents)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_key(path),
        Err(e) => Err(VaultError::PersistenceError(e)),
    }
}

fn parse_key(path: &Path, contents: &str) -> Result<SecretKey> {
    SecretKey::from_encoded(contents).map_err(|e| VaultError::InvalidKey {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn create_key(path: &Path) -> Result<SecretKey> {
    crate::utils::ensure_parent_dir(path)?;

    let key = SecretKey::generate();

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        // Someone else created it between our read and our create
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            let contents = fs::read_to_string(path)?;
            return parse_key(path, &contents);
        }
        Err(e) => return Err(VaultError::PersistenceError(e)),
    };

    writeln!(file, "{}", key.encode())?;
    file.sync_all()?;

    log::info!("Created new encryption key at {}", path.display());
    Ok(key)
}

#[cfg(unix)]
fn warn_if_shared(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            log::warn!(
                "Key file {} is accessible by other users (mode {:o}); consider chmod 600",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_shared(_path: &Path) {}
