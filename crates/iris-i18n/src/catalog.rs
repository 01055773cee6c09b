//! Message catalog with default-language fallback and positional interpolation.
//!
//! # Invariants
//!
//! 1. **Lookup never fails**: a key missing from the current language falls
//!    back to the default language, then to the raw key itself.
//!
//! 2. **Interpolation is single-pass**: `{0}`, `{1}`, ... are replaced in one
//!    scan of the template; substituted text is never re-scanned.
//!
//! 3. **Current language is always loaded**: `set_language` only switches to
//!    a language that has a table.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key absent in current and default tables | Raw key returned |
//! | Unknown language | `set_language` with no matching table | Warning, language unchanged |
//! | Missing argument | `{2}` with only two args | Token left as-is |

use std::collections::HashMap;

use crate::language::{DEFAULT_LANGUAGE, normalize_language_code, primary_subtag};

/// Normalized language code (e.g., `"en-US"`, `"sr-RS"`).
pub type LanguageCode = String;

/// Errors from building translation tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A language code was empty or malformed.
    InvalidLanguage(String),
    /// The same key appears twice in one table.
    DuplicateKey { language: String, key: String },
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLanguage(code) => write!(f, "invalid language code: {code:?}"),
            Self::DuplicateKey { language, key } => {
                write!(f, "duplicate key '{key}' in language '{language}'")
            }
        }
    }
}

impl std::error::Error for I18nError {}

/// Code and display name of a loaded language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: LanguageCode,
    pub name: String,
}

/// Messages for a single language.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    code: LanguageCode,
    name: String,
    strings: HashMap<String, String>,
}

impl LanguageTable {
    /// Create an empty table. The code is normalized.
    pub fn new(code: &str, name: impl Into<String>) -> Result<Self, I18nError> {
        let code =
            normalize_language_code(code).ok_or_else(|| I18nError::InvalidLanguage(code.into()))?;
        Ok(Self {
            code,
            name: name.into(),
            strings: HashMap::new(),
        })
    }

    /// Build a table from `(key, message)` pairs, rejecting duplicate keys.
    pub fn from_pairs<'a>(
        code: &str,
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, I18nError> {
        let mut table = Self::new(code, name)?;
        for (key, value) in pairs {
            if table.strings.contains_key(key) {
                return Err(I18nError::DuplicateKey {
                    language: table.code.clone(),
                    key: key.to_string(),
                });
            }
            table.insert(key, value);
        }
        Ok(table)
    }

    /// Insert or replace a message.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Look up a message by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Language tables plus the current and default language selection.
///
/// # Example
///
/// ```
/// use iris_i18n::Catalog;
///
/// let mut catalog = Catalog::builtin();
/// assert_eq!(catalog.t("loadError", &["timeout"]), "Error loading content: timeout");
///
/// assert!(catalog.set_language("de_DE.UTF-8"));
/// assert_eq!(catalog.language(), "de-DE");
/// assert_eq!(catalog.text("cancel"), "Abbrechen");
/// // Missing in German, found in the default table.
/// assert_eq!(catalog.text("save"), "Save");
/// // Missing everywhere.
/// assert_eq!(catalog.text("no.such.key"), "no.such.key");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<LanguageCode, LanguageTable>,
    default_language: LanguageCode,
    current: LanguageCode,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Create a catalog holding only the given default table.
    #[must_use]
    pub fn new(default_table: LanguageTable) -> Self {
        let code = default_table.code.clone();
        let mut tables = HashMap::new();
        tables.insert(code.clone(), default_table);
        Self {
            tables,
            default_language: code.clone(),
            current: code,
        }
    }

    /// Catalog with every built-in language, `en-US` selected.
    #[must_use]
    pub fn builtin() -> Self {
        let mut tables = crate::builtin::tables().into_iter();
        let mut catalog = match tables.next() {
            Some(default_table) => Self::new(default_table),
            None => Self::new(empty_default()),
        };
        for table in tables {
            catalog.add_language(table);
        }
        catalog
    }

    /// Built-in catalog with the language taken from the environment.
    ///
    /// An unsupported system language leaves the default selected.
    #[must_use]
    pub fn with_system_language() -> Self {
        let mut catalog = Self::builtin();
        let system = crate::language::detect_system_language();
        if let Some(code) = catalog.resolve(&system) {
            catalog.current = code;
        }
        catalog
    }

    /// Add or replace a language table.
    pub fn add_language(&mut self, table: LanguageTable) {
        self.tables.insert(table.code.clone(), table);
    }

    /// Switch the current language.
    ///
    /// Accepts any spelling [`normalize_language_code`] understands. A bare
    /// primary subtag (`"de"`) selects the first loaded regional table for it.
    /// Returns `false` and logs a warning when no table matches.
    pub fn set_language(&mut self, code: &str) -> bool {
        match self.resolve(code) {
            Some(resolved) => {
                tracing::debug!(language = %resolved, "language selected");
                self.current = resolved;
                true
            }
            None => {
                let available: Vec<&str> = self.codes();
                tracing::warn!(
                    requested = code,
                    available = ?available,
                    "language not found"
                );
                false
            }
        }
    }

    /// Current language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.current
    }

    /// Default (fallback) language code.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Loaded languages, sorted by code.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageInfo> {
        let mut out: Vec<LanguageInfo> = self
            .tables
            .values()
            .map(|t| LanguageInfo {
                code: t.code.clone(),
                name: t.name.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.code.cmp(&b.code));
        out
    }

    /// Look up a message in the current language, then the default language.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.tables
            .get(&self.current)
            .and_then(|t| t.get(key))
            .or_else(|| {
                self.tables
                    .get(&self.default_language)
                    .and_then(|t| t.get(key))
            })
    }

    /// Message for `key`, or the key itself when no table provides it.
    #[must_use]
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Translate `key` and substitute positional `{N}` arguments.
    #[must_use]
    pub fn t(&self, key: &str, args: &[&str]) -> String {
        interpolate(self.text(key), args)
    }

    fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn resolve(&self, code: &str) -> Option<LanguageCode> {
        let normalized = normalize_language_code(code)?;
        if self.tables.contains_key(&normalized) {
            return Some(normalized);
        }
        let primary = primary_subtag(&normalized);
        self.codes()
            .into_iter()
            .find(|candidate| primary_subtag(candidate) == primary)
            .map(str::to_string)
    }
}

fn empty_default() -> LanguageTable {
    LanguageTable {
        code: DEFAULT_LANGUAGE.to_string(),
        name: "English".to_string(),
        strings: HashMap::new(),
    }
}

/// Single-pass `{N}` interpolation. Unmatched tokens left as-is.
fn interpolate(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            result.push_str(&rest[open..]);
            return result;
        };

        let token = &after[..close];
        match token.parse::<usize>().ok().and_then(|i| args.get(i)) {
            Some(value) => result.push_str(value),
            None => {
                result.push('{');
                result.push_str(token);
                result.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Catalog {
        let en = LanguageTable::from_pairs(
            "en-US",
            "English",
            [("ok", "OK"), ("greet", "Hello, {0}!"), ("only.en", "English only")],
        )
        .unwrap();
        let sr = LanguageTable::from_pairs("sr-RS", "Srpski", [("ok", "U redu")]).unwrap();
        let mut catalog = Catalog::new(en);
        catalog.add_language(sr);
        catalog
    }

    #[test]
    fn lookup_current_language() {
        let mut catalog = sample();
        assert!(catalog.set_language("sr-RS"));
        assert_eq!(catalog.text("ok"), "U redu");
    }

    #[test]
    fn falls_back_to_default_language() {
        let mut catalog = sample();
        catalog.set_language("sr-RS");
        assert_eq!(catalog.text("only.en"), "English only");
    }

    #[test]
    fn falls_back_to_raw_key() {
        let catalog = sample();
        assert_eq!(catalog.text("missing"), "missing");
        assert_eq!(catalog.lookup("missing"), None);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut catalog = sample();
        assert!(!catalog.set_language("ja-JP"));
        assert!(!catalog.set_language(""));
        assert_eq!(catalog.language(), "en-US");
    }

    #[test]
    fn primary_subtag_selects_regional_table() {
        let mut catalog = sample();
        assert!(catalog.set_language("sr"));
        assert_eq!(catalog.language(), "sr-RS");
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = LanguageTable::from_pairs("en-US", "English", [("a", "1"), ("a", "2")])
            .unwrap_err();
        assert_eq!(
            err,
            I18nError::DuplicateKey {
                language: "en-US".into(),
                key: "a".into()
            }
        );
        assert_eq!(err.to_string(), "duplicate key 'a' in language 'en-US'");
    }

    #[test]
    fn invalid_code_rejected() {
        assert!(matches!(
            LanguageTable::new("", "Nothing"),
            Err(I18nError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn available_languages_sorted() {
        let codes: Vec<String> = sample()
            .available_languages()
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, vec!["en-US".to_string(), "sr-RS".to_string()]);
    }

    #[test]
    fn interpolates_positional_args() {
        assert_eq!(sample().t("greet", &["Ana"]), "Hello, Ana!");
    }

    #[test]
    fn missing_arg_left_verbatim() {
        assert_eq!(sample().t("greet", &[]), "Hello, {0}!");
        assert_eq!(interpolate("{1} and {0}", &["a"]), "{1} and a");
        assert_eq!(interpolate("{name}", &["a"]), "{name}");
    }

    #[test]
    fn unterminated_brace_kept() {
        assert_eq!(interpolate("open { brace", &["x"]), "open { brace");
    }

    #[test]
    fn substituted_text_not_rescanned() {
        assert_eq!(interpolate("{0}{1}", &["{1}", "b"]), "{1}b");
    }

    proptest! {
        #[test]
        fn argument_appears_in_output(arg in "[a-zA-Z0-9 ]{0,24}") {
            let out = sample().t("greet", &[arg.as_str()]);
            prop_assert_eq!(out, format!("Hello, {arg}!"));
        }

        #[test]
        fn templates_without_braces_unchanged(s in "[^{}]{0,64}") {
            prop_assert_eq!(interpolate(&s, &["x", "y"]), s);
        }
    }
}
