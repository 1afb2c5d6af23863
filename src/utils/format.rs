// src/utils/format.rs
use chrono::{DateTime, Utc};

use crate::generators::MAX_SCORE;
use crate::models::StrengthReport;

// Format a duration for display
pub fn format_time_ago(time: DateTime<Utc>) -> String {
    format_time_ago_from(time, Utc::now())
}

fn format_time_ago_from(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds().max(0);

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else if seconds < 2592000 {
        format!("{} days ago", duration.num_days())
    } else if seconds < 31536000 {
        format!("{} months ago", duration.num_days() / 30)
    } else {
        format!("{} years ago", duration.num_days() / 365)
    }
}

/// Render a strength report as the multi-line analysis block shown to the user.
pub fn format_strength_report(report: &StrengthReport) -> String {
    format!(
        "=== PASSWORD ANALYSIS ===\n\
         Lowercase: {}, Uppercase: {}, Digits: {}, Spaces: {}, Special: {}\n\
         Length: {}\n\
         Strength Score: {}/{}\n\
         💬 {}",
        report.lower,
        report.upper,
        report.digit,
        report.space,
        report.special,
        report.length,
        report.score,
        MAX_SCORE,
        report.remark,
    )
}
