//! The work log record and its entry-form validation.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::day::calendar_day;
use crate::types::{LogId, ValidationError};

/// One user-submitted record of a day's activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    /// Store-assigned identifier. Immutable once created.
    pub id: LogId,
    /// When the work happened. Only the calendar day is meaningful.
    pub date: DateTime<Utc>,
    /// Free-text description of the work.
    pub description: String,
    /// Labels in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional ticket reference (e.g. `PROJ-123`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
}

impl WorkLog {
    /// Returns the calendar day of this log in `tz`.
    pub fn day<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        calendar_day(&self.date, tz)
    }

    /// Returns true if the log carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Splits the log into its ID and the remaining fields.
    pub fn into_parts(self) -> (LogId, NewWorkLog) {
        let Self {
            id,
            date,
            description,
            tags,
            ticket,
        } = self;
        (
            id,
            NewWorkLog {
                date,
                description,
                tags,
                ticket,
            },
        )
    }

    /// Re-applies entry validation to an edited log, keeping its ID.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let (id, draft) = self.into_parts();
        Ok(draft.validated()?.with_id(id))
    }
}

/// A work log that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkLog {
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
}

impl NewWorkLog {
    /// Builds a validated entry.
    ///
    /// Tags are trimmed, blank tags dropped and duplicates collapsed while
    /// keeping first-seen order. A blank ticket becomes `None`.
    pub fn new<I, S>(
        date: DateTime<Utc>,
        description: impl Into<String>,
        tags: I,
        ticket: Option<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date,
            description: description.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            ticket,
        }
        .validated()
    }

    /// Normalizes fields and checks the entry-form rules.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.description = self.description.trim().to_string();
        if self.description.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }
        self.tags = normalize_tags(self.tags);
        if self.tags.is_empty() {
            return Err(ValidationError::MissingTags);
        }
        self.ticket = normalize_ticket(self.ticket);
        Ok(self)
    }

    /// Attaches a store-assigned ID.
    pub fn with_id(self, id: LogId) -> WorkLog {
        WorkLog {
            id,
            date: self.date,
            description: self.description,
            tags: self.tags,
            ticket: self.ticket,
        }
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || normalized.iter().any(|t| t == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

fn normalize_ticket(ticket: Option<String>) -> Option<String> {
    ticket
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DateTime<Utc> {
        "2025-01-15T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn new_work_log_normalizes_fields() {
        let log = NewWorkLog::new(
            date(),
            "  Fixed login bug  ",
            ["backend", " auth ", "", "backend"],
            Some("  ".to_string()),
        )
        .unwrap();
        assert_eq!(log.description, "Fixed login bug");
        assert_eq!(log.tags, vec!["backend", "auth"]);
        assert_eq!(log.ticket, None);
    }

    #[test]
    fn new_work_log_requires_description() {
        let err = NewWorkLog::new(date(), "   ", ["a"], None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "description"
            }
        );
    }

    #[test]
    fn new_work_log_requires_a_tag() {
        let err = NewWorkLog::new(date(), "Wrote docs", [" "], None).unwrap_err();
        assert_eq!(err, ValidationError::MissingTags);
    }

    #[test]
    fn validated_keeps_id_of_edited_log() {
        let log = NewWorkLog::new(date(), "Review", ["review"], Some("PR-7".to_string()))
            .unwrap()
            .with_id(LogId::new("log-1").unwrap());
        let mut edited = log.clone();
        edited.tags.push(" review ".to_string());
        let edited = edited.validated().unwrap();
        assert_eq!(edited, log);
    }

    #[test]
    fn work_log_json_omits_absent_ticket() {
        let log = NewWorkLog::new(date(), "Standup", ["meetings"], None)
            .unwrap()
            .with_id(LogId::new("log-2").unwrap());
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(
            json,
            r#"{"id":"log-2","date":"2025-01-15T10:00:00Z","description":"Standup","tags":["meetings"]}"#
        );
    }

    #[test]
    fn work_log_json_tolerates_missing_tags() {
        let json = r#"{"id":"log-3","date":"2025-01-15T10:00:00Z","description":"x"}"#;
        let log: WorkLog = serde_json::from_str(json).unwrap();
        assert!(log.tags.is_empty());
        assert!(!log.has_tag("x"));
    }
}
