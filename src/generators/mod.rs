mod password;
mod strength;

pub use password::generate_password;
pub use strength::{analyze_password_strength, MAX_SCORE};
