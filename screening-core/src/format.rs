use chrono::{DateTime, Local};

pub const NOT_AVAILABLE: &str = "N/A";

/// Renders a backend timestamp in local time, or "N/A".
pub fn format_timestamp(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts
                .with_timezone(&Local)
                .format("%d/%m/%Y, %H:%M:%S")
                .to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_AVAILABLE)
}

pub fn check_mark(present: bool) -> &'static str {
    if present {
        "✓"
    } else {
        "✗"
    }
}
