//! HTTP surface of the translation service
//!
//! Handlers are thin collaborators around the core: parse and validate the
//! input, invoke the resolver, record the outcome, render JSON. Only
//! validation failures surface as errors; resolver and storage problems
//! degrade inside the core.

pub mod health;
pub mod translate;

use crate::resolver::Translator;
use crate::store::TranslationLog;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Shared handler state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub log: Arc<TranslationLog>,
}

/// Build the service router. Middleware layers (CORS, tracing) are applied
/// by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate::translate_text))
        .route("/translate/bulk", post(translate::translate_bulk))
        .route("/translate/languages", get(translate::supported_languages))
        .route("/translate/logs", get(translate::translation_logs))
        .route("/translate/stats", get(translate::translation_stats))
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::health_detailed))
        .with_state(state)
}
