//! Storage layer for the work log.
//!
//! Provides persistence for work logs using `rusqlite`. The store offers the
//! three operations the rest of the application relies on: list every log,
//! append a new log (assigning its ID) and replace an existing log by ID.
//! Logs are never deleted.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization. The CLI opens one per invocation.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Dates are stored as TEXT in RFC 3339 UTC with millisecond precision
//! (e.g. `2024-01-15T10:30:00.000Z`), so lexicographic ordering matches
//! chronological ordering. Dates are parsed when rows are read; a row whose
//! date cannot be parsed is reported as [`DbError::TimestampParse`] instead of
//! being passed on to day-level logic.
//!
//! ## Tags
//!
//! Tags live in `work_log_tags` with their position so insertion order
//! survives a round trip.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use thiserror::Error;
use uuid::Uuid;
use wl_core::{LogId, NewWorkLog, WorkLog};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored log date.
    #[error("invalid date for log {log_id}: {timestamp}")]
    TimestampParse {
        log_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row does not form a valid work log.
    #[error("invalid work log {log_id}: {message}")]
    InvalidRecord { log_id: String, message: String },
    /// No log exists with the given ID.
    #[error("work log not found: {0}")]
    NotFound(LogId),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A `work_logs` row before its date is parsed and its tags attached.
struct LogRow {
    id: String,
    date: String,
    description: String,
    ticket: Option<String>,
}

const SELECT_LOGS: &str = "SELECT id, date, description, ticket FROM work_logs";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            -- date: RFC 3339 UTC (e.g., '2024-01-15T10:30:00.000Z')
            CREATE TABLE IF NOT EXISTS work_logs (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                ticket TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_work_logs_date ON work_logs(date);

            CREATE TABLE IF NOT EXISTS work_log_tags (
                log_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                tag TEXT NOT NULL,
                PRIMARY KEY (log_id, position),
                FOREIGN KEY (log_id) REFERENCES work_logs(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_work_log_tags_tag ON work_log_tags(tag);
            ",
        )?;
        Ok(())
    }

    /// Lists all logs, most recent first (ties broken by ID).
    pub fn list_logs(&self) -> Result<Vec<WorkLog>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_LOGS} ORDER BY date DESC, id ASC"))?;
        let rows = stmt.query_map([], map_log_row)?;
        let mut logs = Vec::new();
        let mut tags = self.list_tags()?;
        for row in rows {
            let row = row?;
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            logs.push(into_work_log(row, row_tags)?);
        }
        tracing::debug!(count = logs.len(), "listed work logs");
        Ok(logs)
    }

    /// Fetches a single log by ID.
    pub fn get_log(&self, id: &LogId) -> Result<Option<WorkLog>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_LOGS} WHERE id = ?"),
                [id.as_str()],
                map_log_row,
            )
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let tags = self.tags_for(id.as_str())?;
        into_work_log(row, tags).map(Some)
    }

    /// Appends a new log, assigning it a fresh ID.
    ///
    /// The returned record carries the date as stored, truncated to
    /// milliseconds.
    pub fn create_log(&mut self, log: &NewWorkLog) -> Result<WorkLog, DbError> {
        let id = Uuid::new_v4().to_string();
        let date = log.date.trunc_subsecs(3);
        let now = format_timestamp(Utc::now());
        let tx = self.conn.transaction()?;
        tx.execute(
            "
            INSERT INTO work_logs (id, date, description, ticket, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
            params![
                id,
                format_timestamp(date),
                log.description,
                log.ticket,
                now,
                now,
            ],
        )?;
        write_tags(&tx, &id, &log.tags)?;
        tx.commit()?;

        tracing::debug!(log_id = %id, "created work log");
        let id = LogId::new(id).map_err(|err| DbError::InvalidRecord {
            log_id: String::new(),
            message: err.to_string(),
        })?;
        let mut created = log.clone().with_id(id);
        created.date = date;
        Ok(created)
    }

    /// Replaces every field of an existing log.
    ///
    /// Returns [`DbError::NotFound`] if no log has the given ID.
    pub fn replace_log(&mut self, log: &WorkLog) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "
            UPDATE work_logs
            SET date = ?, description = ?, ticket = ?, updated_at = ?
            WHERE id = ?
            ",
            params![
                format_timestamp(log.date),
                log.description,
                log.ticket,
                format_timestamp(Utc::now()),
                log.id.as_str(),
            ],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(log.id.clone()));
        }
        tx.execute(
            "DELETE FROM work_log_tags WHERE log_id = ?",
            [log.id.as_str()],
        )?;
        write_tags(&tx, log.id.as_str(), &log.tags)?;
        tx.commit()?;

        tracing::debug!(log_id = %log.id, "replaced work log");
        Ok(())
    }

    /// Loads tags for all logs, in stored order.
    fn list_tags(&self) -> Result<HashMap<String, Vec<String>>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT log_id, tag
            FROM work_log_tags
            ORDER BY log_id ASC, position ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            let log_id: String = row.get(0)?;
            let tag: String = row.get(1)?;
            Ok((log_id, tag))
        })?;
        let mut tags: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let (log_id, tag) = row?;
            tags.entry(log_id).or_default().push(tag);
        }
        Ok(tags)
    }

    fn tags_for(&self, log_id: &str) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag FROM work_log_tags WHERE log_id = ? ORDER BY position ASC")?;
        let rows = stmt.query_map([log_id], |row| row.get::<_, String>(0))?;
        let mut tags = Vec::new();
        for row in rows {
            tags.push(row?);
        }
        Ok(tags)
    }
}

fn map_log_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogRow> {
    Ok(LogRow {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        ticket: row.get(3)?,
    })
}

fn into_work_log(row: LogRow, tags: Vec<String>) -> Result<WorkLog, DbError> {
    let date = parse_timestamp(&row.date, &row.id)?;
    let id = LogId::new(row.id.clone()).map_err(|err| DbError::InvalidRecord {
        log_id: row.id,
        message: err.to_string(),
    })?;
    Ok(WorkLog {
        id,
        date,
        description: row.description,
        tags,
        ticket: row.ticket,
    })
}

fn write_tags(tx: &Transaction<'_>, log_id: &str, tags: &[String]) -> Result<(), DbError> {
    let mut stmt =
        tx.prepare("INSERT INTO work_log_tags (log_id, position, tag) VALUES (?, ?, ?)")?;
    for (position, tag) in (0_i64..).zip(tags) {
        stmt.execute(params![log_id, position, tag])?;
    }
    Ok(())
}

fn parse_timestamp(timestamp: &str, log_id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            log_id: log_id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
