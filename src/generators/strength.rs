// src/generators/strength.rs
use crate::models::StrengthReport;

pub const MAX_SCORE: u8 = 6;

// Indexed by score; score 0 (empty password) shares the lowest remark.
const REMARKS: [&str; MAX_SCORE as usize + 1] = [
    "Even 'password' is feeling offended right now. Try something more secure.",
    "Even 'password' is feeling offended right now. Try something more secure.",
    "This password is like a lock on a diary. Upgrade it to a vault.",
    "Not bad! But you can do better, please consider changing it.",
    "This password has good intentions but needs more muscle.",
    "Strong password. A little more length or variety makes it a fortress.",
    "A very strong password. Hacker tears detected.",
];

pub fn remark_for_score(score: u8) -> &'static str {
    REMARKS[usize::from(score.min(MAX_SCORE))]
}

// Analyze password strength
pub fn analyze_password_strength(password: &str) -> StrengthReport {
    let (mut lower, mut upper, mut digit, mut space, mut special) = (0, 0, 0, 0, 0);
    let mut length = 0;

    for c in password.chars() {
        length += 1;
        if c.is_ascii_lowercase() {
            lower += 1;
        } else if c.is_ascii_uppercase() {
            upper += 1;
        } else if c.is_ascii_digit() {
            digit += 1;
        } else if c.is_whitespace() {
            space += 1;
        } else {
            special += 1;
        }
    }

    let criteria = [
        lower > 0,
        upper > 0,
        digit > 0,
        special > 0,
        length >= 8,
        length >= 12,
    ];
    let score = criteria.iter().filter(|met| **met).count() as u8;

    StrengthReport {
        lower,
        upper,
        digit,
        space,
        special,
        length,
        score,
        remark: remark_for_score(score),
    }
}
