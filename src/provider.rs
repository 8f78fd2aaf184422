//! External translation providers
//!
//! Defines the [`TranslationProvider`] trait for provider abstraction so the
//! resolver is not coupled to any specific backend, plus the Google
//! Translate implementation and a deterministic mock for tests.
//!
//! The resolver makes a single attempt against the provider and falls back
//! to the dictionary on any error, so providers should fail fast rather
//! than retry.

use crate::error::{ServiceError, ServiceResult};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;

/// Generic trait for external translation providers
///
/// Implementations handle the actual translation work, whether through an
/// API (Google Translate) or deterministic logic (mock). All methods are
/// async to support network-bound backends.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate a single text to the target language.
    ///
    /// The source language is left to the provider to infer, matching the
    /// upstream API surface.
    async fn translate(&self, text: &str, target_language: &str) -> ServiceResult<String>;

    /// Name of this provider, for logging and health reporting.
    fn name(&self) -> &str;
}

/// Google Translate API v2 provider
///
/// Single-attempt semantics: the HTTP client carries a short timeout so a
/// stalled upstream degrades to the dictionary fallback quickly instead of
/// holding the request.
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Request timeout for the single translation attempt.
    const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Create a provider with an explicit API key.
    pub fn new(api_key: String) -> ServiceResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ServiceError::Provider(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                ServiceError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable.
    pub fn from_env() -> ServiceResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            ServiceError::Provider(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(&self, text: &str, target_language: &str) -> ServiceResult<String> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        // Source language is omitted; the API detects it.
        let body = json!({
            "q": [text],
            "target": target_language,
            "format": "text"
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Provider(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            ServiceError::Provider(format!("Failed to parse API response: {}", e))
        })?;

        payload["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ServiceError::Provider(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}

/// Behaviors for the [`MockProvider`] test double
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Look up `(text, target)` in predefined mappings; unknown pairs fail.
    Mappings(HashMap<(String, String), String>),
    /// Fail every call with the given message.
    Fail(String),
    /// Succeed with an empty result, which the resolver treats as a failure.
    Empty,
}

/// Deterministic, API-free provider for exercising the resolution pipeline
/// without network access.
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }

    /// Convenience constructor for the mappings behavior.
    pub fn with_mappings(pairs: &[(&str, &str, &str)]) -> Self {
        let map = pairs
            .iter()
            .map(|&(text, target, translation)| {
                ((text.to_string(), target.to_string()), translation.to_string())
            })
            .collect();
        Self::new(MockBehavior::Mappings(map))
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(&self, text: &str, target_language: &str) -> ServiceResult<String> {
        match &self.behavior {
            MockBehavior::Mappings(map) => {
                let key = (text.to_string(), target_language.to_string());
                map.get(&key).cloned().ok_or_else(|| {
                    ServiceError::Provider(format!(
                        "no mapping for '{}' → {}",
                        text, target_language
                    ))
                })
            }
            MockBehavior::Fail(msg) => Err(ServiceError::Provider(msg.clone())),
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "Mock Provider"
    }
}
