use chrono::{DateTime, Duration, Utc};

use crate::models::{AssessmentStatus, ScoreRange};

pub fn score_range(score: f64) -> ScoreRange {
    if score >= 60.0 {
        ScoreRange::High
    } else if score >= 40.0 {
        ScoreRange::Medium
    } else {
        ScoreRange::Low
    }
}

impl ScoreRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreRange::High => "high",
            ScoreRange::Medium => "medium",
            ScoreRange::Low => "low",
        }
    }
}

pub fn status_label(status: AssessmentStatus) -> &'static str {
    match status {
        AssessmentStatus::Completed => "Completed",
        AssessmentStatus::InProgress => "In Progress",
        AssessmentStatus::Pending => "Pending",
        AssessmentStatus::Cancelled => "Cancelled",
    }
}

/// `Jan 15, 2024`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `10:30 AM`
pub fn format_time(date: DateTime<Utc>) -> String {
    date.format("%-I:%M %p").to_string()
}

pub fn format_date_time(date: DateTime<Utc>) -> String {
    format!("{} • {}", format_date(date), format_time(date))
}

pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.0} ({})", score_range(score).as_str()),
        None => "—".to_string(),
    }
}

pub fn is_within_days(date: DateTime<Utc>, days: i64, now: DateTime<Utc>) -> bool {
    date >= now - Duration::days(days)
}

pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => "??".to_string(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}
