//! Selecting and rendering logs for the review assistant.

use chrono::{NaiveDate, TimeZone};

use crate::types::ValidationError;
use crate::worklog::WorkLog;

const LOG_SEPARATOR: &str = "\n\n---\n\n";

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range. A missing `to` selects the single day `from`.
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Result<Self, ValidationError> {
        let to = to.unwrap_or(from);
        if to < from {
            return Err(ValidationError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

/// Logs whose calendar day falls inside `range`, in input order.
pub fn logs_in_range<'a, Tz: TimeZone>(
    logs: &'a [WorkLog],
    range: &DateRange,
    tz: &Tz,
) -> Vec<&'a WorkLog> {
    logs.iter()
        .filter(|log| range.contains(log.day(tz)))
        .collect()
}

/// Renders logs as the plain-text context handed to the language model.
pub fn render_review_context<'a, Tz, I>(logs: I, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    I: IntoIterator<Item = &'a WorkLog>,
{
    logs.into_iter()
        .map(|log| {
            format!(
                "Date: {}\nTags: {}\nDescription: {}",
                log.date.with_timezone(tz).format("%Y-%m-%d"),
                log.tags.join(", "),
                log.description
            )
        })
        .collect::<Vec<_>>()
        .join(LOG_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use insta::assert_snapshot;

    use super::*;
    use crate::fixtures::{day, log_on};

    #[test]
    fn range_defaults_to_single_day() {
        let range = DateRange::new(day(2025, 2, 1), None).unwrap();
        assert_eq!(range.to(), day(2025, 2, 1));
        assert!(range.contains(day(2025, 2, 1)));
        assert!(!range.contains(day(2025, 2, 2)));
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        let err = DateRange::new(day(2025, 2, 5), Some(day(2025, 2, 1))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn logs_in_range_is_inclusive_of_both_ends() {
        let logs = [
            log_on("before", day(2025, 2, 28), 23),
            log_on("start", day(2025, 3, 1), 0),
            log_on("end", day(2025, 3, 3), 23),
            log_on("after", day(2025, 3, 4), 0),
        ];
        let range = DateRange::new(day(2025, 3, 1), Some(day(2025, 3, 3))).unwrap();
        let ids: Vec<&str> = logs_in_range(&logs, &range, &Utc)
            .into_iter()
            .map(|log| log.id.as_str())
            .collect();
        assert_eq!(ids, ["start", "end"]);
    }

    #[test]
    fn review_context_lists_each_log() {
        let mut first = log_on("a", day(2025, 3, 1), 9);
        first.tags = vec!["backend".into(), "auth".into()];
        first.description = "Fixed token refresh".into();
        let mut second = log_on("b", day(2025, 3, 2), 9);
        second.description = "Sprint planning".into();

        let context = render_review_context([&first, &second], &Utc);
        assert_snapshot!(context, @r"
        Date: 2025-03-01
        Tags: backend, auth
        Description: Fixed token refresh

        ---

        Date: 2025-03-02
        Tags: general
        Description: Sprint planning
        ");
    }

    #[test]
    fn review_context_of_nothing_is_empty() {
        assert_eq!(render_review_context(Vec::<&WorkLog>::new(), &Utc), "");
    }
}
