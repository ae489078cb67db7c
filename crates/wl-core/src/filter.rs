//! Ticket and tag filtering for the timesheet view.

use std::collections::BTreeSet;

use crate::worklog::WorkLog;

/// Filter criteria. An empty filter matches every log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Case-insensitive substring to look for in the ticket.
    pub ticket: String,
    /// Tags that must all be present.
    pub tags: BTreeSet<String>,
}

impl LogFilter {
    pub fn new<I, S>(ticket: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ticket: ticket.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the filter has no criteria.
    pub fn is_empty(&self) -> bool {
        self.ticket.trim().is_empty() && self.tags.is_empty()
    }

    /// Returns true if `log` satisfies both the ticket and tag criteria.
    pub fn matches(&self, log: &WorkLog) -> bool {
        self.ticket_matches(log) && self.tags.iter().all(|tag| log.has_tag(tag))
    }

    fn ticket_matches(&self, log: &WorkLog) -> bool {
        if self.ticket.trim().is_empty() {
            return true;
        }
        let query = self.ticket.to_lowercase();
        log.ticket
            .as_deref()
            .is_some_and(|ticket| ticket.to_lowercase().contains(&query))
    }
}

/// Returns the logs matching `filter`, in input order.
pub fn filter_logs<'a>(logs: &'a [WorkLog], filter: &LogFilter) -> Vec<&'a WorkLog> {
    logs.iter().filter(|log| filter.matches(log)).collect()
}
