// src/crypto.rs
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use thiserror::Error;

pub const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const TOKEN_VERSION: u8 = 0x80;
// version byte + big-endian unix timestamp
const HEADER_LEN: usize = 1 + 8;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Key size error: {0}")]
    KeySizeError(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Symmetric key used to encrypt every stored password.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Fresh key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::KeySizeError(format!("expected {} bytes, got {}", KEY_LEN, bytes.len()))
        })?;
        Ok(Self(key))
    }

    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes = URL_SAFE
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidFormat(format!("key is not valid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// URL-safe base64, the form written to the key file.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.0)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Encrypt a password into a self-describing token.
///
/// Layout before base64: `version || issued_at (i64 BE) || nonce || ciphertext+tag`.
/// The version and timestamp are authenticated as associated data.
pub fn encrypt_password(key: &SecretKey, plaintext: &str) -> Result<String> {
    encrypt_password_at(key, plaintext, Utc::now())
}

pub fn encrypt_password_at(key: &SecretKey, plaintext: &str, issued_at: DateTime<Utc>) -> Result<String> {
    let mut header = [0u8; HEADER_LEN];
    header[0] = TOKEN_VERSION;
    header[1..].copy_from_slice(&issued_at.timestamp().to_be_bytes());

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = key
        .cipher()
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload { msg: plaintext.as_bytes(), aad: &header },
        )
        .map_err(|e| CryptoError::EncryptionError(e.to_string()))?;

    let mut token = Vec::with_capacity(HEADER_LEN + NONCE_LEN + ciphertext.len());
    token.extend_from_slice(&header);
    token.extend_from_slice(&nonce);
    token.extend(ciphertext);

    Ok(URL_SAFE.encode(token))
}

// Split a token into its header and body after checking version and length
fn decode_token(token: &str) -> Result<Vec<u8>> {
    let raw = URL_SAFE
        .decode(token.trim())
        .map_err(|e| CryptoError::InvalidFormat(format!("token is not valid base64: {}", e)))?;

    if raw.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::InvalidFormat("Token too short".into()));
    }
    if raw[0] != TOKEN_VERSION {
        return Err(CryptoError::InvalidFormat(format!("Unknown token version 0x{:02x}", raw[0])));
    }

    Ok(raw)
}

/// Decrypt a token produced by [`encrypt_password`].
pub fn decrypt_password(key: &SecretKey, token: &str) -> Result<String> {
    let raw = decode_token(token)?;
    let (header, body) = raw.split_at(HEADER_LEN);
    let (nonce, ciphertext) = body.split_at(NONCE_LEN);

    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad: header })
        .map_err(|e| CryptoError::DecryptionError(e.to_string()))?;

    Ok(String::from_utf8(plaintext)?)
}

/// Time the token was created. Not authenticated until the token is decrypted.
pub fn token_timestamp(token: &str) -> Result<DateTime<Utc>> {
    let raw = decode_token(token)?;
    let mut secs = [0u8; 8];
    secs.copy_from_slice(&raw[1..HEADER_LEN]);

    Utc.timestamp_opt(i64::from_be_bytes(secs), 0)
        .single()
        .ok_or_else(|| CryptoError::InvalidFormat("Token timestamp out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let key = SecretKey::generate();
        let token = encrypt_password(&key, "hunter2 with spaces ✓").unwrap();
        assert_eq!(decrypt_password(&key, &token).unwrap(), "hunter2 with spaces ✓");
    }

    #[test]
    fn test_token_hides_plaintext_and_uses_fresh_nonce() {
        let key = SecretKey::generate();
        let first = encrypt_password(&key, "PLAINTEXT_MARKER").unwrap();
        let second = encrypt_password(&key, "PLAINTEXT_MARKER").unwrap();
        assert!(!first.contains("PLAINTEXT_MARKER"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_fails() {
        let token = encrypt_password(&SecretKey::generate(), "secret").unwrap();
        let err = decrypt_password(&SecretKey::generate(), &token).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionError(_)));
    }

    #[test]
    fn test_tampered_timestamp_fails_authentication() {
        let key = SecretKey::generate();
        let token = encrypt_password(&key, "secret").unwrap();
        let mut raw = URL_SAFE.decode(&token).unwrap();
        raw[8] ^= 0x01;
        let tampered = URL_SAFE.encode(raw);
        assert!(matches!(
            decrypt_password(&key, &tampered),
            Err(CryptoError::DecryptionError(_))
        ));
    }

    #[test]
    fn test_garbage_tokens_are_invalid_format() {
        let key = SecretKey::generate();
        for token in ["", "not base64 !!", "gA=="] {
            assert!(matches!(
                decrypt_password(&key, token),
                Err(CryptoError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_timestamp_is_recoverable() {
        let key = SecretKey::generate();
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = encrypt_password_at(&key, "secret", issued_at).unwrap();
        assert_eq!(token_timestamp(&token).unwrap(), issued_at);
        assert_eq!(decrypt_password(&key, &token).unwrap(), "secret");
    }

    #[test]
    fn test_key_encoding() {
        let key = SecretKey::generate();
        let decoded = SecretKey::from_encoded(&format!("{}\n", key.encode())).unwrap();
        assert_eq!(decoded, key);
        assert!(matches!(
            SecretKey::from_encoded(&URL_SAFE.encode([0u8; 16])),
            Err(CryptoError::KeySizeError(_))
        ));
        assert_eq!(format!("{:?}", key), "SecretKey(<redacted>)");
    }
}
