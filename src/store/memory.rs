//! In-memory fallback buffer for the translation log
//!
//! Active after the durable backend fails. Bounded to the most recent
//! [`MEMORY_BUFFER_CAP`] entries with FIFO eviction, and implements the same
//! filter, sort, and paginate semantics as the durable queries.

use super::{LanguageCount, LogEntry, LogStats, NewLogEntry};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::collections::VecDeque;

/// Maximum number of entries retained while degraded; oldest evicted first.
pub(crate) const MEMORY_BUFFER_CAP: usize = 1000;

#[derive(Debug, Default)]
pub(crate) struct MemoryBuffer {
    entries: VecDeque<LogEntry>,
    next_id: i64,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Append one entry, evicting the oldest when over the cap.
    pub fn append(&mut self, record: &NewLogEntry, timestamp: DateTime<Utc>) -> LogEntry {
        let entry = LogEntry {
            id: self.next_id,
            original_text: record.original_text.clone(),
            translated_text: record.translated_text.clone(),
            target_language: record.target_language.clone(),
            timestamp,
            recorded_at: Utc::now(),
        };
        self.next_id += 1;

        self.entries.push_back(entry.clone());
        if self.entries.len() > MEMORY_BUFFER_CAP {
            self.entries.pop_front();
        }

        entry
    }

    /// Filter by target language, sort newest first, then paginate.
    pub fn query(
        &self,
        limit: usize,
        offset: usize,
        target_language: Option<&str>,
    ) -> Vec<LogEntry> {
        let mut logs: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                target_language
                    .map(|lang| entry.target_language == lang)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs.into_iter().skip(offset).take(limit).collect()
    }

    pub fn stats(&self) -> LogStats {
        let cutoff = Utc::now() - Duration::hours(24);
        let mut counts: HashMap<&str, i64> = HashMap::new();
        let mut recent = 0;

        for entry in &self.entries {
            *counts.entry(entry.target_language.as_str()).or_insert(0) += 1;
            if entry.timestamp >= cutoff {
                recent += 1;
            }
        }

        let mut by_language: Vec<LanguageCount> = counts
            .into_iter()
            .map(|(language, count)| LanguageCount {
                language: language.to_string(),
                count,
            })
            .collect();
        by_language.sort_by(|a, b| b.count.cmp(&a.count).then(a.language.cmp(&b.language)));

        LogStats {
            total_translations: self.entries.len() as i64,
            recent_translations_24h: recent,
            translations_by_language: by_language,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
