//! Supported-language registry and script-based language detection
//!
//! The registry is a fixed table of ISO 639-1 codes and display names,
//! immutable for the process lifetime. Detection is deliberately simple:
//! it sniffs Unicode script blocks rather than doing real language
//! identification, which is all the service promises.

/// Supported languages as `(code, display name)` pairs, in declaration order.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ta", "Tamil"),
    ("hi", "Hindi"),
    ("kn", "Kannada"),
    ("bn", "Bengali"),
];

/// Script blocks checked by [`detect_language`], in priority order.
/// First block with any matching code point wins, even for mixed-script text.
const SCRIPT_BLOCKS: &[(u32, u32, &str)] = &[
    (0x0B80, 0x0BFF, "ta"), // Tamil
    (0x0900, 0x097F, "hi"), // Devanagari
    (0x0C80, 0x0CFF, "kn"), // Kannada
    (0x0980, 0x09FF, "bn"), // Bengali
];

/// Check whether a language code is supported.
///
/// Comparison is case-insensitive; surrounding whitespace is ignored.
pub fn is_supported(code: &str) -> bool {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Get the display name for a language code, if supported.
pub fn display_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Iterate over all supported `(code, display name)` pairs in declaration order.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    SUPPORTED_LANGUAGES.iter().copied()
}

/// Supported codes sorted ascending, for validation error messages.
pub fn supported_codes_sorted() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = SUPPORTED_LANGUAGES.iter().map(|(c, _)| *c).collect();
    codes.sort_unstable();
    codes
}

/// Detect the language of a text by scanning its code points against the
/// known script blocks.
///
/// Blocks are evaluated in fixed priority order (Tamil, Devanagari, Kannada,
/// Bengali); the first block containing any code point of the text wins.
/// Text with no match defaults to `en`.
pub fn detect_language(text: &str) -> &'static str {
    for &(lo, hi, code) in SCRIPT_BLOCKS {
        if text.chars().any(|c| {
            let cp = c as u32;
            cp >= lo && cp <= hi
        }) {
            return code;
        }
    }
    "en"
}
