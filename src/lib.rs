//! anuvad — a small text translation service
//!
//! Accepts text over HTTP and returns a translation, resolved through an
//! ordered fallback pipeline: external provider, exact dictionary phrase,
//! partial phrase substitution, word-by-word substitution, and finally a
//! passthrough marker. Every completed translation is recorded in a log
//! store that writes to SQLite and transparently degrades to a bounded
//! in-memory buffer when the database is unavailable.
//!
//! The core pieces are [`resolver::Translator`] and
//! [`store::TranslationLog`]; the HTTP layer in [`routes`] is a thin
//! collaborator around them.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod languages;
pub mod provider;
pub mod resolver;
pub mod routes;
pub mod store;
pub mod validate;

pub use dictionary::Dictionary;
pub use error::{ServiceError, ServiceResult};
pub use provider::{GoogleTranslateProvider, MockBehavior, MockProvider, TranslationProvider};
pub use resolver::{Translation, TranslationMethod, Translator};
pub use store::{LanguageCount, LogEntry, LogStats, NewLogEntry, TranslationLog};
