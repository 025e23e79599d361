use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use translation_gateway::bundle::BundleStore;
use translation_gateway::cache::TranslationCache;
use translation_gateway::config::Config;
use translation_gateway::provider::RemoteTranslator;
use translation_gateway::resolver::Resolver;
use translation_gateway::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_gateway=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!("Starting translation gateway");
    info!("Provider: LibreTranslate ({})", config.provider_url);
    if config.api_key.is_none() {
        info!("No TRANSLATE_API_KEY set; API is public");
    }

    let bundles = Arc::new(BundleStore::load_dir(Path::new(&config.bundle_dir)));
    let cache = Arc::new(TranslationCache::process_scoped(Duration::from_secs(
        config.cache_ttl_secs,
    )));
    let provider = Arc::new(RemoteTranslator::new(&config)?);
    let resolver = Arc::new(Resolver::new(bundles, cache, provider));

    let port = config.port;
    let state = AppState::new(Arc::new(config), resolver);
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
