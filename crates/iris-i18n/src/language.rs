//! Language code normalization and system language detection.

use std::env;

/// Language used when nothing else matches.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Detect the system language from environment variables.
///
/// Preference order: `LC_ALL`, then `LANG`. Falls back to [`DEFAULT_LANGUAGE`].
#[must_use]
pub fn detect_system_language() -> String {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_from(lc_all.as_deref(), lang.as_deref())
}

/// Normalize a raw language tag into `ll-RR` form.
///
/// Strips encoding (`.UTF-8`) and modifier (`@euro`) suffixes, converts
/// underscores to hyphens, lowercases the primary subtag and uppercases a
/// two-letter region. `C` and `POSIX` map to [`DEFAULT_LANGUAGE`].
/// Returns `None` for empty or malformed input.
#[must_use]
pub fn normalize_language_code(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some(DEFAULT_LANGUAGE.to_string());
    }

    let mut parts = raw.split(['_', '-']);
    let primary = parts.next()?;
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut normalized = primary.to_ascii_lowercase();
    for part in parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        normalized.push('-');
        if part.len() == 2 {
            normalized.push_str(&part.to_ascii_uppercase());
        } else {
            normalized.push_str(part);
        }
    }
    Some(normalized)
}

/// Primary subtag of a normalized code (`"de-DE"` -> `"de"`).
pub(crate) fn primary_subtag(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

fn detect_from(lc_all: Option<&str>, lang: Option<&str>) -> String {
    lc_all
        .and_then(normalize_language_code)
        .or_else(|| lang.and_then(normalize_language_code))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_posix_locale() {
        assert_eq!(
            normalize_language_code("sr_RS.UTF-8").as_deref(),
            Some("sr-RS")
        );
        assert_eq!(
            normalize_language_code("de_DE@euro").as_deref(),
            Some("de-DE")
        );
    }

    #[test]
    fn normalizes_case() {
        assert_eq!(normalize_language_code("EN-us").as_deref(), Some("en-US"));
        assert_eq!(normalize_language_code("fr").as_deref(), Some("fr"));
    }

    #[test]
    fn c_locale_is_default() {
        assert_eq!(normalize_language_code("C").as_deref(), Some("en-US"));
        assert_eq!(normalize_language_code("POSIX").as_deref(), Some("en-US"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(normalize_language_code(""), None);
        assert_eq!(normalize_language_code("  "), None);
        assert_eq!(normalize_language_code("e1-US"), None);
        assert_eq!(normalize_language_code("en--US"), None);
    }

    #[test]
    fn detect_prefers_lc_all() {
        assert_eq!(detect_from(Some("fr_FR.UTF-8"), Some("de_DE.UTF-8")), "fr-FR");
    }

    #[test]
    fn detect_uses_lang_when_lc_all_missing() {
        assert_eq!(detect_from(None, Some("es_ES.UTF-8")), "es-ES");
    }

    #[test]
    fn detect_defaults() {
        assert_eq!(detect_from(None, None), DEFAULT_LANGUAGE);
        assert_eq!(detect_from(Some(""), None), DEFAULT_LANGUAGE);
    }

    #[test]
    fn primary_subtag_splits() {
        assert_eq!(primary_subtag("de-DE"), "de");
        assert_eq!(primary_subtag("fr"), "fr");
    }
}
