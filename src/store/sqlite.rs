//! SQLite backend for the translation log
//!
//! A connection is opened per operation; there is no pooling and no
//! transaction spanning operations. Timestamps are stored as fixed-width
//! RFC 3339 strings so SQLite's lexicographic comparison matches
//! chronological order.

use super::{LanguageCount, LogEntry, LogStats, NewLogEntry};
use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS translation_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    original_text TEXT NOT NULL,
    translated_text TEXT NOT NULL,
    target_language TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_translation_logs_timestamp
    ON translation_logs(timestamp);
CREATE INDEX IF NOT EXISTS idx_translation_logs_target_language
    ON translation_logs(target_language);
";

#[derive(Debug, Clone)]
pub(crate) struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    fn open(&self) -> ServiceResult<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ServiceError::Storage(format!(
                        "failed to create database directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }
        Ok(Connection::open(&self.db_path)?)
    }

    /// Create the schema and indexes if absent.
    pub fn initialize(&self) -> ServiceResult<()> {
        let conn = self.open()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn insert(&self, record: &NewLogEntry, timestamp: DateTime<Utc>) -> ServiceResult<LogEntry> {
        let conn = self.open()?;
        self.insert_with(&conn, record, timestamp)
    }

    /// Insert several records over one connection, sharing the timestamp
    /// the caller resolved.
    pub fn insert_bulk(
        &self,
        records: &[NewLogEntry],
        timestamp: DateTime<Utc>,
    ) -> ServiceResult<Vec<LogEntry>> {
        let conn = self.open()?;
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            entries.push(self.insert_with(&conn, record, record.timestamp.unwrap_or(timestamp))?);
        }
        Ok(entries)
    }

    fn insert_with(
        &self,
        conn: &Connection,
        record: &NewLogEntry,
        timestamp: DateTime<Utc>,
    ) -> ServiceResult<LogEntry> {
        let recorded_at = Utc::now();
        conn.execute(
            "INSERT INTO translation_logs
             (original_text, translated_text, target_language, timestamp, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.original_text,
                record.translated_text,
                record.target_language,
                encode_timestamp(timestamp),
                encode_timestamp(recorded_at),
            ],
        )?;

        Ok(LogEntry {
            id: conn.last_insert_rowid(),
            original_text: record.original_text.clone(),
            translated_text: record.translated_text.clone(),
            target_language: record.target_language.clone(),
            timestamp,
            recorded_at,
        })
    }

    pub fn query(
        &self,
        limit: usize,
        offset: usize,
        target_language: Option<&str>,
    ) -> ServiceResult<Vec<LogEntry>> {
        let conn = self.open()?;

        let base = "SELECT id, original_text, translated_text, target_language,
                           timestamp, recorded_at
                    FROM translation_logs";
        let tail = "ORDER BY timestamp DESC LIMIT ?1 OFFSET ?2";

        let mut rows = Vec::new();
        match target_language {
            Some(lang) => {
                let sql = format!("{} WHERE target_language = ?3 {}", base, tail);
                let mut stmt = conn.prepare(&sql)?;
                let mapped =
                    stmt.query_map(params![limit as i64, offset as i64, lang], row_to_raw)?;
                for row in mapped {
                    rows.push(decode_raw(row?)?);
                }
            }
            None => {
                let sql = format!("{} {}", base, tail);
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(params![limit as i64, offset as i64], row_to_raw)?;
                for row in mapped {
                    rows.push(decode_raw(row?)?);
                }
            }
        }

        Ok(rows)
    }

    pub fn stats(&self) -> ServiceResult<LogStats> {
        let conn = self.open()?;

        let total: i64 =
            conn.query_row("SELECT COUNT(*) FROM translation_logs", [], |row| row.get(0))?;

        let cutoff = encode_timestamp(Utc::now() - Duration::hours(24));
        let recent: i64 = conn.query_row(
            "SELECT COUNT(*) FROM translation_logs WHERE timestamp >= ?1",
            params![cutoff],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT target_language, COUNT(*) as count
             FROM translation_logs
             GROUP BY target_language
             ORDER BY count DESC, target_language ASC",
        )?;
        let mapped = stmt.query_map([], |row| {
            Ok(LanguageCount {
                language: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut by_language = Vec::new();
        for row in mapped {
            by_language.push(row?);
        }

        Ok(LogStats {
            total_translations: total,
            recent_translations_24h: recent,
            translations_by_language: by_language,
        })
    }
}

/// Fixed-width RFC 3339 with microseconds, so string order is time order.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> ServiceResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| ServiceError::Storage(format!("invalid stored timestamp '{}': {}", raw, e)))
}

/// A row before its timestamp strings are decoded.
type RawRow = (i64, String, String, String, String, String);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn decode_raw(raw: RawRow) -> ServiceResult<LogEntry> {
    let (id, original_text, translated_text, target_language, timestamp, recorded_at) = raw;
    Ok(LogEntry {
        id,
        original_text,
        translated_text,
        target_language,
        timestamp: decode_timestamp(&timestamp)?,
        recorded_at: decode_timestamp(&recorded_at)?,
    })
}
