// src/models.rs
use serde::{Serialize, Deserialize};

// Password generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordGenerationOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PasswordGenerationOptions {
    fn default() -> Self {
        Self {
            length: 12,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

/// Result of scoring a password. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub lower: usize,
    pub upper: usize,
    pub digit: usize,
    pub space: usize,
    pub special: usize,
    /// Length in characters, whitespace included.
    pub length: usize,
    pub score: u8,
    pub remark: &'static str,
}

// A decrypted store entry along with when it was saved
#[derive(Debug, Clone, Serialize)]
pub struct SavedPassword {
    pub label: String,
    pub password: String,
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}
