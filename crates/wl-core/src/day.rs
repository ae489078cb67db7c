//! Calendar-day normalization.
//!
//! Every day-level computation (streaks, day buckets, review ranges) goes
//! through [`calendar_day`], so a timestamp is always assigned to the same
//! day for a given time zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::types::ValidationError;

/// Truncates a timestamp to its calendar day in `tz`.
pub fn calendar_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Parses a `YYYY-MM-DD` day.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// Parses a log date given as RFC 3339 or as a bare `YYYY-MM-DD` day.
///
/// A bare day is placed at local noon in `tz`, which keeps it on the same
/// calendar day when read back.
pub fn parse_log_date<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_day(trimmed).map(|day| day_at_noon(day, tz))
}

/// Returns noon of `day` in `tz` as a UTC instant.
pub fn day_at_noon<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let noon = day.and_time(NaiveTime::default()) + Duration::hours(12);
    tz.from_local_datetime(&noon)
        .earliest()
        .map_or_else(|| noon.and_utc(), |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_day_truncates_time_of_day() {
        let ts: DateTime<Utc> = "2025-03-10T23:59:59Z".parse().unwrap();
        assert_eq!(calendar_day(&ts, &Utc), day(2025, 3, 10));
    }

    #[test]
    fn calendar_day_respects_time_zone() {
        let ts: DateTime<Utc> = "2025-03-10T23:30:00Z".parse().unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let la = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(calendar_day(&ts, &tokyo), day(2025, 3, 11));
        assert_eq!(calendar_day(&ts, &la), day(2025, 3, 10));
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert_eq!(parse_day("2025-01-31").unwrap(), day(2025, 1, 31));
        assert_eq!(
            parse_day("2025-02-30"),
            Err(ValidationError::InvalidDate {
                value: "2025-02-30".to_string()
            })
        );
        assert!(parse_day("yesterday").is_err());
    }

    #[test]
    fn parse_log_date_accepts_rfc3339() {
        let parsed = parse_log_date("2025-01-15T10:30:00+02:00", &Utc).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-15T08:30:00+00:00");
    }

    #[test]
    fn parse_log_date_places_bare_day_at_local_noon() {
        let offset = FixedOffset::east_opt(10 * 3600).unwrap();
        let parsed = parse_log_date("2025-01-15", &offset).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-15T02:00:00+00:00");
        assert_eq!(calendar_day(&parsed, &offset), day(2025, 1, 15));
    }

    #[test]
    fn parse_log_date_rejects_invalid_input() {
        let err = parse_log_date("not a date", &Utc).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }
}
