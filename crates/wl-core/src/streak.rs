//! Current logging streak.

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone};

use crate::worklog::WorkLog;

/// Counts consecutive logged days ending today or yesterday.
///
/// Multiple logs on the same day count once. A latest logged day older than
/// yesterday means the streak is broken and the result is 0. Gaps further
/// back only end the walk; they never reset an already-counted run. A log
/// dated after `today` is the latest day and never matches the walk, so the
/// result is 0.
pub fn compute_streak<Tz: TimeZone>(logs: &[WorkLog], today: NaiveDate, tz: &Tz) -> u32 {
    let days: BTreeSet<NaiveDate> = logs.iter().map(|log| log.day(tz)).collect();

    let Some(&latest) = days.last() else {
        return 0;
    };
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 0;
    let mut expected = if today.pred_opt() == Some(latest) {
        latest
    } else {
        today
    };
    for day in days.iter().rev() {
        if *day != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, Utc};

    use super::*;
    use crate::fixtures::{day, log_on};

    fn today() -> NaiveDate {
        day(2025, 3, 10)
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn empty_logs_have_no_streak() {
        assert_eq!(compute_streak(&[], today(), &Utc), 0);
    }

    #[test]
    fn single_log_today_is_one() {
        let logs = [log_on("a", today(), 9)];
        assert_eq!(compute_streak(&logs, today(), &Utc), 1);
    }

    #[test]
    fn single_log_yesterday_is_still_current() {
        let logs = [log_on("a", days_ago(1), 23)];
        assert_eq!(compute_streak(&logs, today(), &Utc), 1);
    }

    #[test]
    fn single_log_two_days_ago_breaks_streak() {
        let logs = [log_on("a", days_ago(2), 9)];
        assert_eq!(compute_streak(&logs, today(), &Utc), 0);
        let logs = [log_on("a", days_ago(30), 9)];
        assert_eq!(compute_streak(&logs, today(), &Utc), 0);
    }

    #[test]
    fn consecutive_days_with_duplicates_count_once_each() {
        let logs = [
            log_on("a", today(), 8),
            log_on("b", today(), 17),
            log_on("c", days_ago(1), 9),
            log_on("d", days_ago(2), 9),
            log_on("e", days_ago(2), 10),
            log_on("f", days_ago(3), 9),
        ];
        assert_eq!(compute_streak(&logs, today(), &Utc), 4);
    }

    #[test]
    fn run_ending_yesterday_counts() {
        let logs = [
            log_on("a", days_ago(1), 9),
            log_on("b", days_ago(2), 9),
            log_on("c", days_ago(3), 9),
        ];
        assert_eq!(compute_streak(&logs, today(), &Utc), 3);
    }

    #[test]
    fn gap_day_breaks_streak() {
        let logs = [log_on("a", today(), 9), log_on("b", days_ago(2), 9)];
        assert_eq!(compute_streak(&logs, today(), &Utc), 1);
    }

    #[test]
    fn older_gaps_do_not_affect_current_run() {
        let logs = [
            log_on("a", today(), 9),
            log_on("b", days_ago(1), 9),
            log_on("c", days_ago(5), 9),
            log_on("d", days_ago(6), 9),
        ];
        assert_eq!(compute_streak(&logs, today(), &Utc), 2);
    }

    #[test]
    fn input_order_does_not_matter() {
        let logs = [
            log_on("c", days_ago(2), 9),
            log_on("a", today(), 9),
            log_on("b", days_ago(1), 9),
        ];
        assert_eq!(compute_streak(&logs, today(), &Utc), 3);
    }

    #[test]
    fn future_log_breaks_the_walk() {
        let logs = [
            log_on("future", today() + Duration::days(3), 9),
            log_on("a", today(), 9),
            log_on("b", days_ago(1), 9),
        ];
        assert_eq!(compute_streak(&logs, today(), &Utc), 0);
    }

    #[test]
    fn days_follow_the_given_time_zone() {
        // 23:00 UTC on the 9th is already the 10th in UTC+2.
        let logs = [log_on("a", days_ago(1), 23), log_on("b", days_ago(2), 12)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(compute_streak(&logs, today(), &Utc), 2);
        assert_eq!(compute_streak(&logs, today(), &plus_two), 1);
    }
}
