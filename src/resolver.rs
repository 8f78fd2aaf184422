//! Translation resolution pipeline
//!
//! The core of the service: given a text and a target language, try the
//! external provider, then fall back through the dictionary tiers, and
//! always produce a result. A request that passed validation can never fail
//! to resolve; every internal failure degrades to the next strategy.
//!
//! Resolution order:
//!
//! 1. Source determination — explicit source language, or script detection.
//! 2. Single external provider attempt (when a provider is configured).
//! 3. Exact phrase match in the dictionary.
//! 4. Partial/substring match, first matching phrase in table order.
//! 5. Word-by-word substitution.
//! 6. Passthrough marker when nothing translated.

use crate::dictionary::Dictionary;
use crate::error::ServiceError;
use crate::languages;
use crate::provider::TranslationProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a translation result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationMethod {
    /// External provider returned a translation.
    External,
    /// Exact phrase match in the dictionary.
    DictionaryPhrase,
    /// Substring match with in-place phrase replacement.
    DictionaryPartial,
    /// Word-by-word substitution.
    DictionaryWord,
    /// Nothing translated; result is a marker echoing the input.
    Passthrough,
    /// Bulk-only: provider failed and the dictionary had nothing.
    Error,
}

/// A resolved translation. Immutable once created; owned by the caller that
/// records it.
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    /// Resolved source language, never absent: either the caller's choice or
    /// the detected one.
    pub source_language: String,
    pub target_language: String,
    pub method: TranslationMethod,
    pub timestamp: DateTime<Utc>,
}

/// Health snapshot of the resolver, produced by a live self-check.
#[derive(Debug, Clone, Serialize)]
pub struct TranslatorHealth {
    pub status: &'static str,
    /// `"provider"` when an external provider is configured, else `"dictionary"`.
    pub translation_method: &'static str,
    pub provider: Option<String>,
    pub supported_languages_count: usize,
    /// Method the self-check translation resolved with.
    pub test_translation_method: TranslationMethod,
}

/// The translation resolver.
///
/// Constructed once at startup with its dictionary and optional provider,
/// then shared by reference across request handlers.
pub struct Translator {
    dictionary: Dictionary,
    provider: Option<Arc<dyn TranslationProvider>>,
}

impl Translator {
    pub fn new(dictionary: Dictionary, provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self {
            dictionary,
            provider,
        }
    }

    /// Whether an external provider is configured.
    pub fn is_using_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Resolve a single text. Never fails for input that passed validation;
    /// a failed provider attempt falls through to the dictionary tiers and
    /// ultimately to the passthrough marker.
    pub async fn resolve(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Translation {
        let (translation, _) = self
            .resolve_inner(text, target_language, source_language)
            .await;
        translation
    }

    /// Resolve multiple texts, one result per input in the same order.
    ///
    /// Failures are isolated per item: an item whose provider attempt failed
    /// and whose dictionary tiers all missed is reported with
    /// [`TranslationMethod::Error`] instead of aborting the batch.
    pub async fn resolve_bulk(
        &self,
        texts: &[String],
        target_language: &str,
        source_language: Option<&str>,
    ) -> Vec<Translation> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let (mut translation, provider_error) = self
                .resolve_inner(text, target_language, source_language)
                .await;

            if let Some(err) = provider_error {
                if translation.method == TranslationMethod::Passthrough {
                    translation.translated_text = format!("Translation failed: {}", err);
                    translation.method = TranslationMethod::Error;
                }
            }

            results.push(translation);
        }
        results
    }

    /// Run a self-check translation and report the resolver's health.
    pub async fn health_check(&self) -> TranslatorHealth {
        let probe = self.resolve("hello", "hi", Some("en")).await;
        TranslatorHealth {
            status: "healthy",
            translation_method: if self.is_using_provider() {
                "provider"
            } else {
                "dictionary"
            },
            provider: self.provider.as_ref().map(|p| p.name().to_string()),
            supported_languages_count: languages::SUPPORTED_LANGUAGES.len(),
            test_translation_method: probe.method,
        }
    }

    /// Shared pipeline. Returns the resolution plus the provider error, if
    /// one occurred, so the bulk path can apply its per-item error marking.
    async fn resolve_inner(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> (Translation, Option<ServiceError>) {
        let target = target_language.trim().to_lowercase();
        let source = match source_language {
            Some(code) => code.trim().to_lowercase(),
            None => languages::detect_language(text).to_string(),
        };

        let mut provider_error = None;
        if let Some(provider) = &self.provider {
            match provider.translate(text, &target).await {
                Ok(translated) if !translated.is_empty() => {
                    debug!(provider = provider.name(), "translated via external provider");
                    return (
                        self.finish(text, translated, source, target, TranslationMethod::External),
                        None,
                    );
                }
                Ok(_) => {
                    provider_error = Some(ServiceError::Provider(
                        "provider returned an empty result".to_string(),
                    ));
                }
                Err(err) => {
                    provider_error = Some(err);
                }
            }
            if let Some(err) = &provider_error {
                warn!(
                    provider = provider.name(),
                    "provider attempt failed, falling back to dictionary: {}", err
                );
            }
        }

        let (translated, method) = self.resolve_with_dictionary(text, &source, &target);
        (
            self.finish(text, translated, source, target, method),
            provider_error,
        )
    }

    fn finish(
        &self,
        text: &str,
        translated: String,
        source: String,
        target: String,
        method: TranslationMethod,
    ) -> Translation {
        Translation {
            original_text: text.to_string(),
            translated_text: translated,
            source_language: source,
            target_language: target,
            method,
            timestamp: Utc::now(),
        }
    }

    /// Three-tier dictionary resolution over the normalized text, ending in
    /// the passthrough marker when nothing translated.
    fn resolve_with_dictionary(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> (String, TranslationMethod) {
        let normalized = normalize_text(text);
        let entries = self.dictionary.entries(source, target);

        // Tier 1: exact phrase match on the normalized text.
        if let Some(translation) = entries
            .iter()
            .find(|(phrase, _)| *phrase == normalized)
            .map(|(_, t)| t)
        {
            return (translation.clone(), TranslationMethod::DictionaryPhrase);
        }

        // Tier 2: substring match either way, first phrase in table order
        // wins. The replacement happens in the lowercased original so the
        // untranslated remainder keeps its punctuation.
        let lowered = text.trim().to_lowercase();
        for (phrase, translation) in entries {
            if normalized.contains(phrase.as_str()) || phrase.contains(normalized.as_str()) {
                return (
                    lowered.replace(phrase.as_str(), translation),
                    TranslationMethod::DictionaryPartial,
                );
            }
        }

        // Tier 3: word-by-word substitution, untranslated words unchanged.
        let substituted = self.substitute_words(&normalized, source, target);

        // Passthrough when the substitution is character-for-character
        // identical to the normalized input.
        if substituted == normalized {
            let display = languages::display_name(target).unwrap_or(target);
            return (
                format!("[Mock translation to {}] {}", display, text),
                TranslationMethod::Passthrough,
            );
        }

        (substituted, TranslationMethod::DictionaryWord)
    }

    /// Map each whitespace-separated word through the dictionary, joining
    /// with single spaces.
    fn substitute_words(&self, normalized: &str, source: &str, target: &str) -> String {
        normalized
            .split_whitespace()
            .map(|word| {
                self.dictionary
                    .translate_exact(source, target, word)
                    .unwrap_or(word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalize text for dictionary lookup: trim, lowercase, and strip
/// characters that are neither alphanumeric nor whitespace (Unicode-aware).
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockBehavior, MockProvider};

    fn dictionary_only() -> Translator {
        Translator::new(Dictionary::builtin(), None)
    }

    fn with_provider(provider: MockProvider) -> Translator {
        Translator::new(Dictionary::builtin(), Some(Arc::new(provider)))
    }

    // ========== Normalization Tests ==========

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize_text("Hello, World!"), "hello world");
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_text("  Good Morning  "), "good morning");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize_text("வணக்கம்!"), "வணக்கம்");
    }

    #[test]
    fn test_normalize_keeps_inner_whitespace() {
        // Only trimming at the edges; inner runs survive normalization.
        assert_eq!(normalize_text("a  b"), "a  b");
    }

    // ========== Dictionary Tier Tests ==========

    #[tokio::test]
    async fn test_phrase_match() {
        let translator = dictionary_only();
        let result = translator.resolve("hello", "ta", None).await;
        assert_eq!(result.translated_text, "வணக்கம்");
        assert_eq!(result.method, TranslationMethod::DictionaryPhrase);
        assert_eq!(result.source_language, "en");
        assert_eq!(result.target_language, "ta");
    }

    #[tokio::test]
    async fn test_phrase_match_ignores_case_and_punctuation() {
        let translator = dictionary_only();
        let result = translator.resolve("Thank You!", "hi", None).await;
        assert_eq!(result.translated_text, "धन्यवाद");
        assert_eq!(result.method, TranslationMethod::DictionaryPhrase);
    }

    #[tokio::test]
    async fn test_partial_match_replaces_within_text() {
        let translator = dictionary_only();
        let result = translator.resolve("good morning everyone", "hi", None).await;
        assert_eq!(result.method, TranslationMethod::DictionaryPartial);
        assert!(result.translated_text.contains("सुप्रभात"));
        assert!(result.translated_text.contains("everyone"));
    }

    #[tokio::test]
    async fn test_partial_match_first_phrase_in_table_order_wins() {
        let mut dict = Dictionary::new();
        dict.insert("en", "ta", "good morning", "காலை வணக்கம்");
        dict.insert("en", "ta", "morning", "காலை");
        let translator = Translator::new(dict, None);

        let result = translator.resolve("good morning friends", "ta", None).await;
        // "good morning" is inserted first, so it wins over "morning".
        assert_eq!(result.translated_text, "காலை வணக்கம் friends");
    }

    #[tokio::test]
    async fn test_partial_match_text_inside_phrase_replaces_nothing() {
        let mut dict = Dictionary::new();
        dict.insert("en", "ta", "thank you very much", "மிக்க நன்றி");
        let translator = Translator::new(dict, None);

        // The text is a substring of the phrase; the replacement finds no
        // occurrence and the lowercased text comes back unchanged.
        let result = translator.resolve("thank you", "ta", None).await;
        assert_eq!(result.method, TranslationMethod::DictionaryPartial);
        assert_eq!(result.translated_text, "thank you");
    }

    #[test]
    fn test_word_substitution_maps_known_words() {
        let translator = dictionary_only();
        let substituted = translator.substitute_words("good water xyz", "en", "ta");
        assert_eq!(substituted, "நல்ல தண்ணீர் xyz");
    }

    #[test]
    fn test_word_substitution_joins_with_single_spaces() {
        let translator = dictionary_only();
        let substituted = translator.substitute_words("xyz  abc", "en", "ta");
        assert_eq!(substituted, "xyz abc");
    }

    // ========== Passthrough Tests ==========

    #[tokio::test]
    async fn test_passthrough_embeds_display_name_and_original() {
        let translator = dictionary_only();
        let result = translator.resolve("xyzxyz", "ta", None).await;
        assert_eq!(result.method, TranslationMethod::Passthrough);
        assert!(result.translated_text.contains("xyzxyz"));
        assert!(result.translated_text.contains("Tamil"));
    }

    #[tokio::test]
    async fn test_passthrough_keeps_untrimmed_original() {
        let translator = dictionary_only();
        let result = translator.resolve("  Xyzxyz  ", "ta", None).await;
        assert_eq!(result.method, TranslationMethod::Passthrough);
        assert!(result.translated_text.contains("  Xyzxyz  "));
    }

    #[tokio::test]
    async fn test_en_to_en_falls_through_to_passthrough() {
        let translator = dictionary_only();
        let result = translator.resolve("hello", "en", None).await;
        assert_eq!(result.method, TranslationMethod::Passthrough);
        assert!(result.translated_text.contains("English"));
    }

    #[tokio::test]
    async fn test_absent_pair_falls_through_to_passthrough() {
        let translator = dictionary_only();
        // Tamil source with English target has no table.
        let result = translator.resolve("வணக்கம்", "en", None).await;
        assert_eq!(result.source_language, "ta");
        assert_eq!(result.method, TranslationMethod::Passthrough);
    }

    // ========== Source Determination Tests ==========

    #[tokio::test]
    async fn test_explicit_source_is_respected_and_lowercased() {
        let translator = dictionary_only();
        let result = translator.resolve("hello", "ta", Some("EN")).await;
        assert_eq!(result.source_language, "en");
        assert_eq!(result.method, TranslationMethod::DictionaryPhrase);
    }

    #[tokio::test]
    async fn test_detected_source_for_devanagari_text() {
        let translator = dictionary_only();
        let result = translator.resolve("नमस्ते", "ta", None).await;
        assert_eq!(result.source_language, "hi");
    }

    // ========== Provider Interaction Tests ==========

    #[tokio::test]
    async fn test_provider_success_short_circuits_dictionary() {
        let provider = MockProvider::with_mappings(&[("hello", "ta", "from-provider")]);
        let translator = with_provider(provider);
        let result = translator.resolve("hello", "ta", None).await;
        assert_eq!(result.translated_text, "from-provider");
        assert_eq!(result.method, TranslationMethod::External);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_dictionary() {
        let provider = MockProvider::new(MockBehavior::Fail("API down".to_string()));
        let translator = with_provider(provider);
        let result = translator.resolve("hello", "ta", None).await;
        assert_eq!(result.translated_text, "வணக்கம்");
        assert_eq!(result.method, TranslationMethod::DictionaryPhrase);
    }

    #[tokio::test]
    async fn test_provider_empty_result_falls_back() {
        let provider = MockProvider::new(MockBehavior::Empty);
        let translator = with_provider(provider);
        let result = translator.resolve("hello", "ta", None).await;
        assert_eq!(result.method, TranslationMethod::DictionaryPhrase);
    }

    #[tokio::test]
    async fn test_single_resolve_never_reports_error_method() {
        // Provider fails and the dictionary has nothing; single resolution
        // still degrades to passthrough rather than error.
        let provider = MockProvider::new(MockBehavior::Fail("API down".to_string()));
        let translator = with_provider(provider);
        let result = translator.resolve("xyzxyz", "ta", None).await;
        assert_eq!(result.method, TranslationMethod::Passthrough);
    }

    // ========== Bulk Tests ==========

    #[tokio::test]
    async fn test_bulk_preserves_order_and_count() {
        let translator = dictionary_only();
        let texts = vec![
            "hello".to_string(),
            "xyzxyz".to_string(),
            "thank you".to_string(),
        ];
        let results = translator.resolve_bulk(&texts, "ta", None).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].original_text, "hello");
        assert_eq!(results[1].original_text, "xyzxyz");
        assert_eq!(results[2].original_text, "thank you");
    }

    #[tokio::test]
    async fn test_bulk_isolates_per_item_failures() {
        let provider = MockProvider::new(MockBehavior::Fail("API down".to_string()));
        let translator = with_provider(provider);
        let texts = vec![
            "hello".to_string(),
            "xyzxyz".to_string(),
            "thank you".to_string(),
        ];
        let results = translator.resolve_bulk(&texts, "ta", None).await;

        assert_eq!(results.len(), 3);
        // Items with dictionary coverage still succeed.
        assert_eq!(results[0].method, TranslationMethod::DictionaryPhrase);
        assert_eq!(results[2].method, TranslationMethod::DictionaryPhrase);
        // The uncovered item surfaces the provider failure as an error result.
        assert_eq!(results[1].method, TranslationMethod::Error);
        assert!(results[1].translated_text.contains("Translation failed"));
    }

    #[tokio::test]
    async fn test_bulk_without_provider_uses_passthrough_not_error() {
        let translator = dictionary_only();
        let texts = vec!["xyzxyz".to_string()];
        let results = translator.resolve_bulk(&texts, "ta", None).await;
        assert_eq!(results[0].method, TranslationMethod::Passthrough);
    }

    // ========== Health Check Tests ==========

    #[tokio::test]
    async fn test_health_check_dictionary_mode() {
        let translator = dictionary_only();
        let health = translator.health_check().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.translation_method, "dictionary");
        assert_eq!(health.supported_languages_count, 5);
        assert_eq!(
            health.test_translation_method,
            TranslationMethod::DictionaryPhrase
        );
    }

    #[tokio::test]
    async fn test_health_check_reports_provider() {
        let provider = MockProvider::new(MockBehavior::Fail("down".to_string()));
        let translator = with_provider(provider);
        let health = translator.health_check().await;
        assert_eq!(health.translation_method, "provider");
        assert_eq!(health.provider.as_deref(), Some("Mock Provider"));
    }

    // ========== Method Serialization Tests ==========

    #[test]
    fn test_method_serializes_kebab_case() {
        let names: Vec<String> = [
            TranslationMethod::External,
            TranslationMethod::DictionaryPhrase,
            TranslationMethod::DictionaryPartial,
            TranslationMethod::DictionaryWord,
            TranslationMethod::Passthrough,
            TranslationMethod::Error,
        ]
        .iter()
        .map(|m| serde_json::to_value(m).unwrap().as_str().unwrap().to_string())
        .collect();

        assert_eq!(
            names,
            vec![
                "external",
                "dictionary-phrase",
                "dictionary-partial",
                "dictionary-word",
                "passthrough",
                "error"
            ]
        );
    }
}
