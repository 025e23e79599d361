//! Language registry: single source of truth for the supported language set.
//!
//! Every language code used anywhere downstream (cache keys, bundle files,
//! provider requests) must come from this registry. It is initialized once
//! via `OnceLock` and immutable afterwards.

use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "hi")
    pub code: &'static str,

    /// English display name (e.g., "Hindi")
    pub name: &'static str,

    /// Name in the language itself (e.g., "हिन्दी")
    pub native_name: &'static str,

    /// Whether this is the canonical/source language (exactly one is true)
    pub is_canonical: bool,

    /// Whether this language is currently offered
    pub enabled: bool,
}

/// Registry of all supported languages.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry, initializing it on first use.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: supported_languages(),
        })
    }

    /// Look up a language by its ISO 639-1 code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages currently enabled, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// The canonical (source) language.
    ///
    /// # Panics
    /// Panics if the registry defines zero or multiple canonical languages,
    /// which would be a programming error in `supported_languages`.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical.len() {
            1 => canonical[0],
            0 => panic!("No canonical language defined in registry"),
            _ => panic!("Multiple canonical languages defined in registry"),
        }
    }

    /// Whether a code names a supported, enabled language.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// The supported language set.
///
/// English is the canonical source language; the rest are the Indic
/// target languages the static bundles and pre-translator cover.
fn supported_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "bn",
            name: "Bengali",
            native_name: "বাংলা",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "ta",
            name: "Tamil",
            native_name: "தமிழ்",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "te",
            name: "Telugu",
            native_name: "తెలుగు",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "kn",
            name: "Kannada",
            native_name: "ಕನ್ನಡ",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "ml",
            name: "Malayalam",
            native_name: "മലയാളം",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "mr",
            name: "Marathi",
            native_name: "मराठी",
            is_canonical: false,
            enabled: true,
        },
    ]
}
