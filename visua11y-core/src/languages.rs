//! Language registry, code resolution and label translation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::constants::DEFAULT_LANGUAGE;

/// Source label to translated string.
pub type Dictionary = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub label: String,
}

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English (English)"),
    ("de", "Deutsch (German)"),
    ("es", "Español (Spanish)"),
    ("fr", "Français (French)"),
    ("it", "Italiano (Italian)"),
    ("nl", "Nederlands (Dutch)"),
    ("pt", "Português (Portuguese)"),
    ("zh-Hans", "简体中文 (Chinese, Simplified)"),
];

/// Options accepted by [`LanguageRegistry::register_language`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLanguageOptions {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub dictionary: Dictionary,
    #[serde(default)]
    pub merge: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    entries: Vec<LanguageEntry>,
    dictionaries: HashMap<String, Dictionary>,
    default_code: String,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageRegistry {
    /// Registry without any languages. Resolution always yields `default_code`.
    #[must_use]
    pub fn empty(default_code: &str) -> Self {
        Self {
            entries: Vec::new(),
            dictionaries: HashMap::new(),
            default_code: default_code.to_string(),
        }
    }

    /// Registry seeded with the bundled languages; dictionaries load separately.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty(DEFAULT_LANGUAGE);
        registry.entries = BUILTIN_LANGUAGES
            .iter()
            .map(|(code, label)| LanguageEntry {
                code: (*code).to_string(),
                label: (*label).to_string(),
            })
            .collect();
        registry
    }

    #[must_use]
    pub fn languages(&self) -> &[LanguageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Case-insensitive lookup of a registered language.
    #[must_use]
    pub fn find_language(&self, code: &str) -> Option<&LanguageEntry> {
        if code.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.find_language(code).is_some()
    }

    /// Registered language for a tag: exact (case-insensitive) match first,
    /// then the base subtag of a regional tag.
    #[must_use]
    pub fn match_language(&self, input: &str) -> Option<&LanguageEntry> {
        let requested = input.trim();
        self.find_language(requested).or_else(|| {
            let (base, _region) = requested.split_once('-')?;
            self.find_language(base)
        })
    }

    /// Map a requested tag onto a supported code, the default code when
    /// nothing matches.
    #[must_use]
    pub fn resolve_language_code(&self, input: Option<&str>) -> String {
        input
            .and_then(|requested| self.match_language(requested))
            .map_or_else(|| self.default_code.clone(), |entry| entry.code.clone())
    }

    /// Add or update a language and its dictionary.
    ///
    /// Returns the stored code, or `None` when `code` is empty.
    pub fn register_language(&mut self, options: RegisterLanguageOptions) -> Option<String> {
        let code = options.code.trim();
        if code.is_empty() {
            log::warn!("registerLanguage: a non-empty language code is required");
            return None;
        }

        let code = if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
        {
            if let Some(label) = options.label {
                entry.label = label;
            }
            entry.code.clone()
        } else {
            self.entries.push(LanguageEntry {
                code: code.to_string(),
                label: options.label.unwrap_or_else(|| code.to_string()),
            });
            code.to_string()
        };

        if options.merge {
            self.dictionaries
                .entry(code.clone())
                .or_default()
                .extend(options.dictionary);
        } else {
            self.dictionaries.insert(code.clone(), options.dictionary);
        }

        log::debug!("registered language {code}");
        Some(code)
    }

    #[must_use]
    pub fn dictionary(&self, code: &str) -> Option<&Dictionary> {
        self.dictionaries.get(code)
    }

    #[must_use]
    pub fn has_dictionary(&self, code: &str) -> bool {
        self.dictionaries.contains_key(code)
    }

    /// Install a dictionary for a registered or unregistered code.
    pub fn insert_dictionary(&mut self, code: &str, dictionary: Dictionary) {
        self.dictionaries.insert(code.to_string(), dictionary);
    }

    /// Registered codes that have no dictionary yet.
    #[must_use]
    pub fn missing_dictionaries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !self.dictionaries.contains_key(&entry.code))
            .map(|entry| entry.code.clone())
            .collect()
    }

    /// Translate `label` for `lang`, falling back to the default language and
    /// then to the label itself.
    #[must_use]
    pub fn translate(&self, lang: Option<&str>, label: &str) -> String {
        let code = self.resolve_language_code(lang);
        self.dictionaries
            .get(&code)
            .and_then(|dict| dict.get(label))
            .or_else(|| {
                self.dictionaries
                    .get(&self.default_code)
                    .and_then(|dict| dict.get(label))
            })
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }
}
