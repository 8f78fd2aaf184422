//! Health endpoints: aggregate status of the resolver and the log store

use super::AppState;
use crate::languages;
use crate::validate::{MAX_BULK_TEXTS, MAX_TEXT_LENGTH};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// `GET /health` — service status including the store mode flag.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let translation = state.translator.health_check().await;
    let storage_method = storage_method(&state).await;

    Json(json!({
        "status": if translation.status == "healthy" { "ok" } else { "degraded" },
        "services": {
            "translation": translation,
            "logger": {
                "service": "logger",
                "status": "healthy",
                "storage_method": storage_method,
            },
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /health/detailed` — health plus store statistics and system info.
pub async fn health_detailed(State(state): State<AppState>) -> Json<Value> {
    let translation = state.translator.health_check().await;
    let storage_method = storage_method(&state).await;

    // A stats failure degrades the logger report instead of failing the probe.
    let (logger_status, statistics) = match state.log.stats().await {
        Ok(stats) => ("healthy", json!(stats)),
        Err(err) => ("degraded", json!({ "error": err.to_string() })),
    };

    let supported: BTreeMap<&str, &str> = languages::all().collect();

    Json(json!({
        "status": if translation.status == "healthy" { "ok" } else { "degraded" },
        "services": {
            "translation": translation,
            "logger": {
                "service": "logger",
                "status": logger_status,
                "storage_method": storage_method,
                "statistics": statistics,
            },
        },
        "system": {
            "supported_languages": supported,
            "external_provider": state.translator.is_using_provider(),
            "max_text_length": MAX_TEXT_LENGTH,
            "max_bulk_size": MAX_BULK_TEXTS,
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn storage_method(state: &AppState) -> &'static str {
    if state.log.is_durable().await {
        "database"
    } else {
        "in_memory"
    }
}
