use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Column holding the cookie identifier.
pub const COOKIE_COLUMN: &str = "cookie";
/// Column holding the `YYYY-MM-DDTHH:MM:SS+00:00` timestamp.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// One row of a cookie log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub cookie: String,
    pub timestamp: String,
}

impl CookieRecord {
    pub fn new(cookie: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The calendar day this record is grouped under.
    pub fn day(&self) -> Result<&str> {
        day_of(&self.timestamp)
    }
}

/// Truncates a timestamp to the portion before its first `T`.
///
/// The time of day and offset are ignored; no timezone conversion happens.
pub fn day_of(timestamp: &str) -> Result<&str> {
    match timestamp.split_once('T') {
        Some((day, _)) => Ok(day),
        None => anyhow::bail!("Timestamp '{}' has no 'T' date separator", timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_drops_time_and_offset() {
        assert_eq!(day_of("2018-12-09T14:19:00+00:00").unwrap(), "2018-12-09");
        assert_eq!(day_of("2018-12-09T23:59:59+00:00").unwrap(), "2018-12-09");
    }

    #[test]
    fn day_splits_on_first_separator() {
        assert_eq!(day_of("2018-12-09TT").unwrap(), "2018-12-09");
        assert_eq!(day_of("T10:00:00").unwrap(), "");
    }

    #[test]
    fn day_is_not_normalized() {
        assert_eq!(day_of(" 2018-12-09 T00:00").unwrap(), " 2018-12-09 ");
    }

    #[test]
    fn timestamp_without_separator_is_rejected() {
        let err = day_of("2018-12-09 14:19:00").unwrap_err();
        assert!(err.to_string().contains("no 'T'"));
    }

    #[test]
    fn record_day_uses_its_timestamp() {
        let record = CookieRecord::new("AtY0laUfhglK3lC7", "2018-12-09T14:19:00+00:00");
        assert_eq!(record.day().unwrap(), "2018-12-09");
    }
}
