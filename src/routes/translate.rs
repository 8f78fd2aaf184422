//! Translation endpoints: single, bulk, languages, logs, and stats

use super::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::languages;
use crate::resolver::{Translation, TranslationMethod};
use crate::store::{LogEntry, LogStats, NewLogEntry};
use crate::validate::{validate_bulk_texts, validate_language_code, validate_text};
use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkTranslateRequest {
    pub texts: Vec<String>,
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkTranslateResponse {
    pub translations: Vec<Translation>,
    pub total_count: usize,
    pub successful_count: usize,
    pub failed_count: usize,
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
pub struct LogsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub target_language: Option<String>,
}

/// `POST /translate` — translate a single text.
pub async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> ServiceResult<Json<Translation>> {
    validate_text(&request.text)?;
    validate_language_code(&request.target_language)?;
    if let Some(source) = &request.source_language {
        validate_language_code(source)?;
    }

    let translation = state
        .translator
        .resolve(
            &request.text,
            &request.target_language,
            request.source_language.as_deref(),
        )
        .await;

    // Recording is best-effort; a storage failure never fails the call.
    if let Err(err) = state.log.log_one(NewLogEntry::from(&translation)).await {
        warn!("failed to record translation: {}", err);
    }

    Ok(Json(translation))
}

/// `POST /translate/bulk` — translate several texts in one request.
pub async fn translate_bulk(
    State(state): State<AppState>,
    Json(request): Json<BulkTranslateRequest>,
) -> ServiceResult<Json<BulkTranslateResponse>> {
    validate_bulk_texts(&request.texts)?;
    validate_language_code(&request.target_language)?;
    if let Some(source) = &request.source_language {
        validate_language_code(source)?;
    }

    let translations = state
        .translator
        .resolve_bulk(
            &request.texts,
            &request.target_language,
            request.source_language.as_deref(),
        )
        .await;

    let successful_count = translations
        .iter()
        .filter(|t| t.method != TranslationMethod::Error)
        .count();
    let failed_count = translations.len() - successful_count;

    // Only successful items are persisted.
    let records: Vec<NewLogEntry> = translations
        .iter()
        .filter(|t| t.method != TranslationMethod::Error)
        .map(NewLogEntry::from)
        .collect();
    if !records.is_empty() {
        if let Err(err) = state.log.log_bulk(records).await {
            warn!("failed to record bulk translations: {}", err);
        }
    }

    let total_count = translations.len();
    Ok(Json(BulkTranslateResponse {
        translations,
        total_count,
        successful_count,
        failed_count,
        target_language: request.target_language.trim().to_lowercase(),
    }))
}

/// `GET /translate/languages` — supported language codes and display names.
pub async fn supported_languages() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(languages::all().collect())
}

/// `GET /translate/logs` — paginated, optionally filtered log retrieval.
pub async fn translation_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsParams>,
) -> ServiceResult<Json<Vec<LogEntry>>> {
    let limit = params.limit.unwrap_or(50);
    if !(1..=1000).contains(&limit) {
        return Err(ServiceError::Validation(
            "Limit must be between 1 and 1000".to_string(),
        ));
    }

    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return Err(ServiceError::Validation(
            "Offset must be non-negative".to_string(),
        ));
    }

    let filter = match &params.target_language {
        Some(code) => {
            validate_language_code(code)?;
            Some(code.trim().to_lowercase())
        }
        None => None,
    };

    let logs = state
        .log
        .query(limit as usize, offset as usize, filter.as_deref())
        .await?;
    Ok(Json(logs))
}

/// `GET /translate/stats` — aggregate log statistics.
pub async fn translation_stats(State(state): State<AppState>) -> ServiceResult<Json<LogStats>> {
    let stats = state.log.stats().await?;
    Ok(Json(stats))
}
