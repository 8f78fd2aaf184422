//! Mock translation table
//!
//! A fixed, strongly-typed nested mapping keyed by `(source, target)`
//! language pairs, built once at startup from static data. Each pair holds
//! its entries as an ordered list because the partial-match fallback tier
//! scans phrases in insertion order and the first match wins, so the
//! enumeration order is part of the contract.

use std::collections::HashMap;

/// Phrase-to-translation table for the dictionary fallback tiers.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    tables: HashMap<(String, String), Vec<(String, String)>>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dictionary from the built-in static data.
    pub fn builtin() -> Self {
        let mut dict = Self::new();
        for &(target, entries) in BUILTIN_EN_TABLES {
            for &(phrase, translation) in entries {
                dict.insert("en", target, phrase, translation);
            }
        }
        dict
    }

    /// Insert an entry for a `(source, target)` pair, preserving insertion order.
    pub fn insert(&mut self, source: &str, target: &str, phrase: &str, translation: &str) {
        self.tables
            .entry((source.to_string(), target.to_string()))
            .or_default()
            .push((phrase.to_string(), translation.to_string()));
    }

    /// Entries for a `(source, target)` pair in insertion order.
    ///
    /// Returns an empty slice for pairs absent from the table.
    pub fn entries(&self, source: &str, target: &str) -> &[(String, String)] {
        self.tables
            .get(&(source.to_string(), target.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up an exact phrase for a `(source, target)` pair.
    pub fn translate_exact(&self, source: &str, target: &str, phrase: &str) -> Option<&str> {
        self.entries(source, target)
            .iter()
            .find(|(p, _)| p == phrase)
            .map(|(_, t)| t.as_str())
    }
}

/// Built-in English-source tables, one per target language.
///
/// Multi-word phrases come before single words so the partial tier prefers
/// the longer match when both would apply.
const BUILTIN_EN_TABLES: &[(&str, &[(&str, &str)])] = &[
    (
        "ta",
        &[
            ("good morning", "காலை வணக்கம்"),
            ("good night", "இனிய இரவு"),
            ("thank you", "நன்றி"),
            ("how are you", "எப்படி இருக்கிறீர்கள்"),
            ("hello", "வணக்கம்"),
            ("goodbye", "பிரியாவிடை"),
            ("welcome", "வரவேற்பு"),
            ("world", "உலகம்"),
            ("water", "தண்ணீர்"),
            ("friend", "நண்பர்"),
            ("good", "நல்ல"),
            ("morning", "காலை"),
            ("night", "இரவு"),
        ],
    ),
    (
        "hi",
        &[
            ("good morning", "सुप्रभात"),
            ("good night", "शुभ रात्रि"),
            ("thank you", "धन्यवाद"),
            ("how are you", "आप कैसे हैं"),
            ("hello", "नमस्ते"),
            ("goodbye", "अलविदा"),
            ("welcome", "स्वागत है"),
            ("world", "दुनिया"),
            ("water", "पानी"),
            ("friend", "दोस्त"),
            ("good", "अच्छा"),
            ("morning", "सुबह"),
            ("night", "रात"),
        ],
    ),
    (
        "kn",
        &[
            ("good morning", "ಶುಭೋದಯ"),
            ("good night", "ಶುಭ ರಾತ್ರಿ"),
            ("thank you", "ಧನ್ಯವಾದ"),
            ("how are you", "ಹೇಗಿದ್ದೀರಿ"),
            ("hello", "ನಮಸ್ಕಾರ"),
            ("goodbye", "ವಿದಾಯ"),
            ("welcome", "ಸುಸ್ವಾಗತ"),
            ("world", "ಜಗತ್ತು"),
            ("water", "ನೀರು"),
            ("friend", "ಸ್ನೇಹಿತ"),
            ("good", "ಒಳ್ಳೆಯ"),
            ("morning", "ಬೆಳಿಗ್ಗೆ"),
            ("night", "ರಾತ್ರಿ"),
        ],
    ),
    (
        "bn",
        &[
            ("good morning", "সুপ্রভাত"),
            ("good night", "শুভ রাত্রি"),
            ("thank you", "ধন্যবাদ"),
            ("how are you", "কেমন আছেন"),
            ("hello", "হ্যালো"),
            ("goodbye", "বিদায়"),
            ("welcome", "স্বাগতম"),
            ("world", "পৃথিবী"),
            ("water", "পানি"),
            ("friend", "বন্ধু"),
            ("good", "ভালো"),
            ("morning", "সকাল"),
            ("night", "রাত"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_hello_in_tamil() {
        let dict = Dictionary::builtin();
        assert_eq!(dict.translate_exact("en", "ta", "hello"), Some("வணக்கம்"));
    }

    #[test]
    fn test_builtin_covers_all_non_english_targets() {
        let dict = Dictionary::builtin();
        for target in ["ta", "hi", "kn", "bn"] {
            assert!(
                !dict.entries("en", target).is_empty(),
                "en→{} table should not be empty",
                target
            );
        }
    }

    #[test]
    fn test_absent_pair_yields_empty_slice() {
        let dict = Dictionary::builtin();
        assert!(dict.entries("en", "en").is_empty());
        assert!(dict.entries("ta", "en").is_empty());
    }

    #[test]
    fn test_entries_preserve_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert("en", "ta", "good morning", "காலை வணக்கம்");
        dict.insert("en", "ta", "good", "நல்ல");
        dict.insert("en", "ta", "morning", "காலை");

        let phrases: Vec<&str> = dict
            .entries("en", "ta")
            .iter()
            .map(|(p, _)| p.as_str())
            .collect();
        assert_eq!(phrases, vec!["good morning", "good", "morning"]);
    }

    #[test]
    fn test_builtin_lists_phrases_before_words() {
        let dict = Dictionary::builtin();
        let entries = dict.entries("en", "hi");
        let phrase_pos = entries.iter().position(|(p, _)| p == "good morning");
        let word_pos = entries.iter().position(|(p, _)| p == "good");
        assert!(phrase_pos.unwrap() < word_pos.unwrap());
    }

    #[test]
    fn test_translate_exact_misses() {
        let dict = Dictionary::builtin();
        assert_eq!(dict.translate_exact("en", "ta", "xyzxyz"), None);
        assert_eq!(dict.translate_exact("en", "fr", "hello"), None);
    }
}
