//! Resolution orchestrator: the tiered lookup chain.
//!
//! Every resolution walks the same order: ephemeral cache, then static
//! bundle, then the remote provider, then literal/source text. The
//! terminal state is always a usable string; no path errors out of
//! [`Resolver::resolve`]. Provenance is tracked for observability only
//! and never affects which text is returned.

use crate::bundle::BundleStore;
use crate::cache::{CacheKey, TranslationCache};
use crate::error::ProviderError;
use crate::i18n::{Language, TranslationMetrics};
use crate::provider::RemoteTranslator;
use std::sync::Arc;
use tracing::debug;

/// Which tier produced the resolved text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Cache,
    Bundle,
    Remote,
    Fallback,
}

/// A resolved piece of text plus where it came from.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub text: String,
    pub provenance: Provenance,
}

/// Outcome of a free-text translation, shaped for the HTTP endpoint.
#[derive(Debug, Clone)]
pub struct TextTranslation {
    pub text: String,
    pub detected_source: String,
    pub cached: bool,
}

/// Sequences cache, bundles, and the remote provider.
pub struct Resolver {
    bundles: Arc<BundleStore>,
    cache: Arc<TranslationCache>,
    provider: Arc<RemoteTranslator>,
}

impl Resolver {
    pub fn new(
        bundles: Arc<BundleStore>,
        cache: Arc<TranslationCache>,
        provider: Arc<RemoteTranslator>,
    ) -> Self {
        Self {
            bundles,
            cache,
            provider,
        }
    }

    /// Resolve a symbolic translation key into `target`-language text.
    ///
    /// Always returns a usable string: on any failure the canonical
    /// bundle's text (or the literal key) comes back instead. Failed
    /// provider results are never cached, so a later call retries.
    pub async fn resolve(&self, key: &str, target: Language) -> Resolution {
        // Step 0: nothing to resolve
        if key.trim().is_empty() {
            return Resolution {
                text: key.to_string(),
                provenance: Provenance::Fallback,
            };
        }

        let source = Language::canonical();
        let metrics = TranslationMetrics::global();

        // Same-language requests never need the provider
        if target == source {
            return match self.bundles.lookup(target, key) {
                Some(text) => Resolution {
                    text: text.to_string(),
                    provenance: Provenance::Bundle,
                },
                None => Resolution {
                    text: key.to_string(),
                    provenance: Provenance::Fallback,
                },
            };
        }

        let cache_key = CacheKey::for_key(source.code(), target.code(), key);

        if let Some(text) = self.cache.get(&cache_key) {
            metrics.record_cache_hit();
            return Resolution {
                text,
                provenance: Provenance::Cache,
            };
        }
        metrics.record_cache_miss();

        if let Some(text) = self.bundles.lookup(target, key) {
            metrics.record_bundle_hit();
            self.cache.insert(cache_key, text);
            return Resolution {
                text: text.to_string(),
                provenance: Provenance::Bundle,
            };
        }

        let base = self.bundles.base_text(key);

        match self
            .provider
            .translate(&base, Some(source.code()), target.code())
            .await
        {
            Ok(text) => {
                self.cache.insert(cache_key, text.as_str());
                Resolution {
                    text,
                    provenance: Provenance::Remote,
                }
            }
            Err(e) => {
                // Provider already logged and counted the failure; the
                // contract here is only that the caller gets text back
                debug!("Falling back to source text for '{}': {}", key, e);
                Resolution {
                    text: base,
                    provenance: Provenance::Fallback,
                }
            }
        }
    }

    /// Translate free text for the HTTP endpoint: cache, then detection
    /// (only when the source is absent or `auto`), then the provider.
    ///
    /// Unlike [`resolve`](Self::resolve), provider failure surfaces as
    /// an error so the network boundary can answer 500; degradation to
    /// source text is the symbolic-key path's contract, not this one's.
    pub async fn translate_text(
        &self,
        text: &str,
        source: Option<&str>,
        target: Language,
    ) -> Result<TextTranslation, ProviderError> {
        let source = source.map(str::trim).filter(|s| !s.is_empty());
        let declared_source = source.unwrap_or("auto");

        if text.trim().is_empty() {
            return Ok(TextTranslation {
                text: text.to_string(),
                detected_source: declared_source.to_string(),
                cached: false,
            });
        }

        // Explicit source equal to the target: nothing to translate
        if source.is_some_and(|s| s != "auto" && Language::normalize(Some(s)) == target) {
            return Ok(TextTranslation {
                text: text.to_string(),
                detected_source: target.code().to_string(),
                cached: false,
            });
        }

        let metrics = TranslationMetrics::global();
        let cache_key = CacheKey::for_text(source, target.code(), text);

        if let Some(cached) = self.cache.get(&cache_key) {
            metrics.record_cache_hit();
            return Ok(TextTranslation {
                text: cached,
                detected_source: declared_source.to_string(),
                cached: true,
            });
        }
        metrics.record_cache_miss();

        let detected = match source {
            Some(s) if s != "auto" => Language::normalize(Some(s)),
            _ => self.provider.detect(text).await,
        };

        let translated = self
            .provider
            .translate(text, Some(detected.code()), target.code())
            .await?;

        self.cache.insert(cache_key, translated.as_str());

        Ok(TextTranslation {
            text: translated,
            detected_source: detected.code().to_string(),
            cached: false,
        })
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
