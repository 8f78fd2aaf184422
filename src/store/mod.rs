//! Translation log store
//!
//! Persists every completed translation behind one contract with two
//! backends: durable SQLite and a bounded in-memory buffer. The store is an
//! explicit two-state machine; any init or write failure against the
//! durable backend triggers the single `Durable → Degraded` transition, and
//! the store never moves back within a process — recovery to durable mode
//! happens only at restart.
//!
//! A persisted entry is a projection of a [`Translation`]: it keeps the
//! texts, the target language, and the timestamps, and deliberately drops
//! the source language and the resolution method.

mod memory;
mod sqlite;

use crate::error::{ServiceError, ServiceResult};
use crate::resolver::Translation;
use chrono::{DateTime, Utc};
use memory::MemoryBuffer;
use serde::Serialize;
use sqlite::SqliteStore;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Which backend the store is writing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Durable,
    Degraded,
}

/// A persisted translation log record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    /// When the translation happened.
    pub timestamp: DateTime<Utc>,
    /// When the store recorded it.
    pub recorded_at: DateTime<Utc>,
}

/// Input for a log call; the store assigns a timestamp if none is given.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewLogEntry {
    pub fn new(original_text: &str, translated_text: &str, target_language: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            target_language: target_language.to_string(),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl From<&Translation> for NewLogEntry {
    /// Project a translation into its persisted form, dropping the source
    /// language and resolution method.
    fn from(translation: &Translation) -> Self {
        NewLogEntry::new(
            &translation.original_text,
            &translation.translated_text,
            &translation.target_language,
        )
        .at(translation.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: i64,
}

/// Aggregate statistics over the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    pub total_translations: i64,
    pub recent_translations_24h: i64,
    /// Per-language counts, sorted by count descending.
    pub translations_by_language: Vec<LanguageCount>,
}

struct LogInner {
    mode: StoreMode,
    durable: SqliteStore,
    buffer: MemoryBuffer,
    closed: bool,
}

impl LogInner {
    /// The one transition of the state machine. Idempotent; once degraded
    /// the store stays degraded for the rest of the process.
    fn degrade(&mut self, cause: &ServiceError) {
        if self.mode == StoreMode::Durable {
            self.mode = StoreMode::Degraded;
            warn!("durable log store failed, switching to in-memory logging: {}", cause);
        }
    }
}

/// Dual-mode translation log store.
///
/// Mode flag and buffer live behind one mutex so concurrent callers that
/// trigger the fallback transition at the same time cannot corrupt the
/// buffer or double-count.
pub struct TranslationLog {
    inner: Mutex<LogInner>,
}

impl TranslationLog {
    pub fn new(db_path: &Path) -> Self {
        Self {
            inner: Mutex::new(LogInner {
                mode: StoreMode::Durable,
                durable: SqliteStore::new(db_path),
                buffer: MemoryBuffer::new(),
                closed: false,
            }),
        }
    }

    /// Prepare the durable backend, creating the schema if absent.
    ///
    /// On failure the store degrades permanently and the error is returned;
    /// the caller decides whether to warn or abort. There is no background
    /// retry.
    pub async fn initialize(&self) -> ServiceResult<()> {
        let mut inner = self.inner.lock().await;
        let durable = inner.durable.clone();
        match run_blocking(move || durable.initialize()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                inner.degrade(&err);
                Err(err)
            }
        }
    }

    /// Append one entry, stamping it with the current time when the record
    /// carries none.
    ///
    /// A durable write failure degrades the store and retries the append in
    /// memory, which still counts as success.
    pub async fn log_one(&self, record: NewLogEntry) -> ServiceResult<LogEntry> {
        let timestamp = record.timestamp.unwrap_or_else(Utc::now);
        let mut inner = self.inner.lock().await;

        if inner.mode == StoreMode::Durable {
            let durable = inner.durable.clone();
            let to_insert = record.clone();
            match run_blocking(move || durable.insert(&to_insert, timestamp)).await {
                Ok(entry) => return Ok(entry),
                Err(err) => inner.degrade(&err),
            }
        }

        Ok(inner.buffer.append(&record, timestamp))
    }

    /// Append several entries sharing one timestamp unless a record carries
    /// its own. Same degradation semantics as [`log_one`](Self::log_one).
    pub async fn log_bulk(&self, records: Vec<NewLogEntry>) -> ServiceResult<Vec<LogEntry>> {
        let shared = Utc::now();
        let mut inner = self.inner.lock().await;

        if inner.mode == StoreMode::Durable {
            let durable = inner.durable.clone();
            let to_insert = records.clone();
            match run_blocking(move || durable.insert_bulk(&to_insert, shared)).await {
                Ok(entries) => return Ok(entries),
                Err(err) => inner.degrade(&err),
            }
        }

        Ok(records
            .iter()
            .map(|record| {
                inner
                    .buffer
                    .append(record, record.timestamp.unwrap_or(shared))
            })
            .collect())
    }

    /// Retrieve entries, newest first, with limit and offset applied after
    /// filtering and sorting.
    ///
    /// Read failures are returned to the caller; they do not flip the mode.
    pub async fn query(
        &self,
        limit: usize,
        offset: usize,
        target_language: Option<&str>,
    ) -> ServiceResult<Vec<LogEntry>> {
        let inner = self.inner.lock().await;
        match inner.mode {
            StoreMode::Durable => {
                let durable = inner.durable.clone();
                let filter = target_language.map(|s| s.to_string());
                run_blocking(move || durable.query(limit, offset, filter.as_deref())).await
            }
            StoreMode::Degraded => Ok(inner.buffer.query(limit, offset, target_language)),
        }
    }

    /// Aggregate statistics over the active backend.
    pub async fn stats(&self) -> ServiceResult<LogStats> {
        let inner = self.inner.lock().await;
        match inner.mode {
            StoreMode::Durable => {
                let durable = inner.durable.clone();
                run_blocking(move || durable.stats()).await
            }
            StoreMode::Degraded => Ok(inner.buffer.stats()),
        }
    }

    /// Whether the store is still writing to the durable backend.
    pub async fn is_durable(&self) -> bool {
        self.inner.lock().await.mode == StoreMode::Durable
    }

    /// Release durable resources. Idempotent; connections are opened per
    /// operation, so this only marks the lifecycle boundary.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if !inner.closed {
            inner.closed = true;
            debug!("translation log store closed");
        }
    }
}

/// Run a blocking storage operation off the async runtime.
async fn run_blocking<T, F>(op: F) -> ServiceResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ServiceError::Storage(format!("storage task failed: {}", e)))?
}
