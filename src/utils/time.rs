//! Time utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a datetime string.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and bare `YYYY-MM-DD` (midnight),
/// all interpreted as UTC when no offset is given.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2026-03-01T10:30:00Z").is_some());
        assert!(parse_datetime("2026-03-01T10:30:00+05:00").is_some());
        assert!(parse_datetime("2026-03-01 10:30").is_some());
        assert!(parse_datetime("2026-03-01").is_some());
        assert!(parse_datetime("tomorrow").is_none());
        assert!(parse_datetime("2026-13-01").is_none());
    }
}
