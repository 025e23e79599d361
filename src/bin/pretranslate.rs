//! Offline batch pre-translator.
//!
//! Drives the remote provider across the canonical bundle's full key
//! set for every enabled non-canonical language and writes the results
//! as `<code>.json` files next to the source bundle. Runs outside the
//! request path; a fixed inter-request delay keeps it under the
//! provider's rate limit. Keys whose translation fails keep the
//! canonical text, so the output key set always matches the source.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use translation_gateway::bundle::BundleStore;
use translation_gateway::config::Config;
use translation_gateway::i18n::{Language, LanguageRegistry};
use translation_gateway::provider::RemoteTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_gateway=info".parse()?)
                .add_directive("pretranslate=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let dir = Path::new(&config.bundle_dir);
    let bundles = BundleStore::load_dir(dir);
    let entries = bundles.canonical_entries();

    if entries.is_empty() {
        bail!(
            "No canonical bundle entries found under {}; nothing to pre-translate",
            dir.display()
        );
    }

    let provider = RemoteTranslator::new(&config)?;
    let delay = Duration::from_millis(config.pretranslate_delay_ms);
    let canonical = Language::canonical();

    for lang in LanguageRegistry::get().list_enabled() {
        if lang.is_canonical {
            continue;
        }

        info!("Generating {}.json ({} keys)", lang.code, entries.len());

        let mut translated = serde_json::Map::new();
        for (key, text) in &entries {
            let value = match provider
                .translate(text, Some(canonical.code()), lang.code)
                .await
            {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "'{}' -> '{}' failed ({}); keeping canonical text",
                        key, lang.code, e
                    );
                    (*text).to_string()
                }
            };
            translated.insert((*key).to_string(), serde_json::Value::String(value));

            // Inter-request spacing for the provider's rate limit
            tokio::time::sleep(delay).await;
        }

        let path = dir.join(format!("{}.json", lang.code));
        let json = serde_json::to_string_pretty(&serde_json::Value::Object(translated))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    info!("Pre-translation complete");
    Ok(())
}
