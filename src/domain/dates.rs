//! Calendar helpers and lenient timestamp (de)serialization.
//!
//! The backend stores dates as ISO timestamps but older records carry plain `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an RFC 3339 timestamp or a bare date (taken as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// True when `at` falls in the same calendar month and year as `now`.
pub fn same_month(at: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    at.year() == now.year() && at.month() == now.month()
}

/// Years offered by the report year selector: two years back through the current one.
pub fn report_years(current: i32) -> [i32; 3] {
    [current - 2, current - 1, current]
}

/// `Option<DateTime<Utc>>` serde adapter accepting RFC 3339, bare dates, null and "".
pub mod lenient {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => s.serialize_str(&dt.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_millis() {
        let dt = parse_timestamp("2024-03-05T10:20:30.000Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5));
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_timestamp("2024-12-31").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 12, 31));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_same_month_checks_year_too() {
        let a = parse_timestamp("2025-10-02").unwrap();
        let b = parse_timestamp("2026-10-15").unwrap();
        let c = parse_timestamp("2026-10-30").unwrap();
        assert!(!same_month(&a, &b));
        assert!(same_month(&c, &b));
    }

    #[test]
    fn test_report_years() {
        assert_eq!(report_years(2026), [2024, 2025, 2026]);
    }
}
