//! Validated language type and locale normalization.
//!
//! `Language` wraps a code that is guaranteed to exist in the
//! [`LanguageRegistry`](crate::i18n::LanguageRegistry). Arbitrary locale
//! identifiers enter the system only through [`Language::normalize`] or
//! [`Language::preferred`], both of which are infallible and coerce
//! anything unsupported to the canonical default.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A language validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "hi")
    code: &'static str,
}

impl Language {
    /// Create a Language from an exact ISO 639-1 code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is supported and enabled
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The canonical (source) language, typically English.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Normalize an arbitrary locale identifier to a supported language.
    ///
    /// Strips region suffixes (`hi-IN` -> `hi`, `en_US.UTF-8` -> `en`),
    /// lowercases, and validates against the registry. Absent or
    /// unsupported input yields the canonical default. Never fails.
    pub fn normalize(raw: Option<&str>) -> Language {
        let Some(raw) = raw else {
            return Language::canonical();
        };

        let base = raw
            .trim()
            .split(|c| c == '-' || c == '_' || c == '.' || c == ';' || c == ',')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        Language::from_code(&base).unwrap_or_else(|_| Language::canonical())
    }

    /// Derive the preferred language from the available signals.
    ///
    /// Priority order: request `accept-language`-style header (first
    /// entry), explicit UI/user setting, then the process locale
    /// (`LC_ALL`/`LANG`). Each candidate is normalized; the first one
    /// that maps to a supported language wins, else the canonical
    /// default. Never fails.
    pub fn preferred(header: Option<&str>, ui_setting: Option<&str>) -> Language {
        let env_locale = std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .ok();

        for candidate in [header, ui_setting, env_locale.as_deref()] {
            let Some(candidate) = candidate else { continue };
            let base = candidate
                .trim()
                .split(|c| c == '-' || c == '_' || c == '.' || c == ';' || c == ',')
                .next()
                .unwrap_or("")
                .to_ascii_lowercase();
            if let Ok(lang) = Language::from_code(&base) {
                return lang;
            }
        }

        Language::canonical()
    }

    /// The ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry metadata for this language.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot
    /// happen for a properly constructed `Language`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English display name (e.g., "Tamil").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native display name (e.g., "தமிழ்").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the canonical source language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}
