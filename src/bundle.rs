//! Static bundle store: pre-translated key/text mappings.
//!
//! Bundles are flat `<code>.json` files (one per language) loaded once
//! at startup and never mutated afterwards. The canonical language's
//! file is authoritative for the key set; other languages may be
//! partial or missing entirely. A language whose file is absent or
//! unreadable simply gets an empty bundle, so every lookup for it
//! misses and the resolution chain falls through to the provider.

use crate::i18n::{Language, LanguageRegistry};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Immutable language -> (key -> text) mapping.
pub struct BundleStore {
    bundles: HashMap<&'static str, HashMap<String, String>>,
}

impl BundleStore {
    /// Scan `dir` for one `<code>.json` file per enabled language.
    ///
    /// A failure to load one language's file never prevents the others
    /// from loading; it is logged and that language starts empty.
    pub fn load_dir(dir: &Path) -> Self {
        let mut bundles = HashMap::new();

        for lang in LanguageRegistry::get().list_enabled() {
            let path = dir.join(format!("{}.json", lang.code));

            if !path.exists() {
                debug!("No bundle file for '{}', starting empty", lang.code);
                bundles.insert(lang.code, HashMap::new());
                continue;
            }

            match load_bundle_file(&path) {
                Ok(map) => {
                    info!("Loaded {} bundle entries for '{}'", map.len(), lang.code);
                    bundles.insert(lang.code, map);
                }
                Err(e) => {
                    warn!("Failed to load bundle for '{}': {:#}", lang.code, e);
                    bundles.insert(lang.code, HashMap::new());
                }
            }
        }

        Self { bundles }
    }

    /// Build a store from in-memory maps (embedded defaults, tests).
    pub fn from_map(bundles: HashMap<&'static str, HashMap<String, String>>) -> Self {
        Self { bundles }
    }

    /// Text for `key` in `lang`, if the bundle carries it. A miss is not
    /// an error; it signals fallback to the next tier.
    pub fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.bundles
            .get(lang.code())
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }

    /// Source text for `key`: the canonical bundle's entry, or the key
    /// itself as the last-resort literal. Never absent.
    pub fn base_text(&self, key: &str) -> String {
        self.lookup(Language::canonical(), key)
            .unwrap_or(key)
            .to_string()
    }

    /// The canonical bundle's entries, sorted by key. This is the full
    /// key set the pre-translator drives.
    pub fn canonical_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .bundles
            .get(Language::canonical().code())
            .map(|bundle| {
                bundle
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }

    /// Number of entries loaded for `lang`.
    pub fn len(&self, lang: Language) -> usize {
        self.bundles.get(lang.code()).map_or(0, HashMap::len)
    }
}

fn load_bundle_file(path: &Path) -> Result<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let map: HashMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(map)
}

impl std::fmt::Debug for BundleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes: HashMap<_, _> = self
            .bundles
            .iter()
            .map(|(code, bundle)| (*code, bundle.len()))
            .collect();
        f.debug_struct("BundleStore").field("bundles", &sizes).finish()
    }
}
