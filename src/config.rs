use anyhow::Result;

/// Runtime configuration, loaded from the environment.
///
/// Every knob has a default so the service can start with an empty
/// environment; `TRANSLATE_API_KEY` is the only security-sensitive value
/// and is optional (unset means the API is public).
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Remote translation provider (LibreTranslate-compatible)
    pub provider_url: String,
    pub provider_timeout_secs: u64,

    // Ephemeral cache
    pub cache_ttl_secs: u64,

    // Static bundles
    pub bundle_dir: String,

    // Shared-secret check for the translate endpoint
    pub api_key: Option<String>,

    // Batch pre-translator
    pub pretranslate_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),

            provider_url: std::env::var("LIBRETRANSLATE_URL")
                .unwrap_or_else(|_| "https://libretranslate.de/translate".to_string()),
            provider_timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            // Documented default: one hour
            cache_ttl_secs: std::env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),

            bundle_dir: std::env::var("BUNDLE_DIR").unwrap_or_else(|_| "translations".to_string()),

            api_key: std::env::var("TRANSLATE_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),

            pretranslate_delay_ms: std::env::var("PRETRANSLATE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
        })
    }

    /// Detection endpoint derived from the translate URL, mirroring the
    /// LibreTranslate path layout (`/translate` -> `/detect`).
    pub fn provider_detect_url(&self) -> String {
        self.provider_url.replace("/translate", "/detect")
    }
}
