//! Ephemeral translation cache.
//!
//! One type covers both deployment shapes: the process-scoped variant
//! carries a TTL so entries age out under load, the session-scoped
//! variant has no TTL and is dropped (or cleared) with the session.
//! Expiry is checked lazily on read; an expired entry behaves exactly
//! like a miss and is evicted on the spot. There is no background sweep.
//!
//! Time comes from an injected [`Clock`] so tests can advance it
//! deterministically instead of sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, the production clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Composite cache key: `(sourceLang, targetLang, text-or-key)`.
///
/// Natural-language payloads are trimmed and case-folded so whitespace
/// and casing variation collapses onto one entry; symbolic translation
/// keys are matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source: String,
    target: String,
    text: String,
}

impl CacheKey {
    /// Key for a free-text payload. An absent source language is keyed
    /// as `auto` so pre- and post-detection lookups agree.
    pub fn for_text(source: Option<&str>, target: &str, text: &str) -> Self {
        Self {
            source: source.unwrap_or("auto").to_string(),
            target: target.to_string(),
            text: text.trim().to_lowercase(),
        }
    }

    /// Key for a symbolic translation key (exact match, no folding).
    pub fn for_key(source: &str, target: &str, key: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            text: key.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    /// `None` means the entry never expires (session-scoped variant)
    expires_at: Option<Instant>,
}

/// Bounded-lifetime key/value store for resolved translations.
///
/// Entries are independent and writes are idempotent overwrites, so a
/// single mutex around the map is all the coordination needed. Callers
/// never hold the lock across an await point; `get` and `insert` are
/// synchronous and release it before returning.
pub struct TranslationCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl TranslationCache {
    /// Process-wide cache shared by concurrent request handlers.
    /// Entries expire `ttl` after insertion.
    pub fn process_scoped(ttl: Duration) -> Self {
        Self::with_clock(Some(ttl), Arc::new(SystemClock))
    }

    /// Session-scoped cache: no TTL, cleared explicitly or dropped with
    /// the session.
    pub fn session_scoped() -> Self {
        Self::with_clock(None, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock (tests inject a manual one).
    pub fn with_clock(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // A poisoned lock only means another thread panicked mid-write;
        // the map itself is still a valid cache.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a key. Expired entries are evicted and reported as a miss;
    /// stale data is never returned.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) => {
                if let Some(expires_at) = entry.expires_at {
                    if self.clock.now() >= expires_at {
                        entries.remove(key);
                        return None;
                    }
                }
                Some(entry.value.clone())
            }
            None => None,
        }
    }

    /// Insert a value under the cache's default TTL. Last writer wins.
    pub fn insert(&self, key: CacheKey, value: impl Into<String>) {
        let expires_at = self.ttl.map(|ttl| self.clock.now() + ttl);
        self.lock().insert(
            key,
            CacheEntry {
                value: value.into(),
                expires_at,
            },
        );
    }

    /// Drop every entry (session end).
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including any not yet lazily evicted.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Manually advanced clock for deterministic expiry tests.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn text_key(text: &str) -> CacheKey {
        CacheKey::for_text(Some("en"), "hi", text)
    }

    // ==================== Basic Contract Tests ====================

    #[test]
    fn test_get_returns_inserted_value() {
        let cache = TranslationCache::process_scoped(Duration::from_secs(60));
        cache.insert(text_key("welcome"), "स्वागत है");
        assert_eq!(cache.get(&text_key("welcome")), Some("स्वागत है".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let cache = TranslationCache::process_scoped(Duration::from_secs(60));
        assert_eq!(cache.get(&text_key("absent")), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = TranslationCache::process_scoped(Duration::from_secs(60));
        cache.insert(text_key("welcome"), "first");
        cache.insert(text_key("welcome"), "second");
        assert_eq!(cache.get(&text_key("welcome")), Some("second".to_string()));
        assert_eq!(cache.len(), 1);
    }

    // ==================== TTL Tests ====================

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let cache = TranslationCache::with_clock(Some(Duration::from_secs(1)), clock.clone());

        cache.insert(text_key("welcome"), "स्वागत है");
        assert!(cache.get(&text_key("welcome")).is_some());

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&text_key("welcome")), None);
    }

    #[test]
    fn test_entry_live_just_before_expiry() {
        let clock = ManualClock::new();
        let cache = TranslationCache::with_clock(Some(Duration::from_secs(10)), clock.clone());

        cache.insert(text_key("welcome"), "value");
        clock.advance(Duration::from_secs(9));
        assert!(cache.get(&text_key("welcome")).is_some());
    }

    #[test]
    fn test_expired_read_evicts_entry() {
        let clock = ManualClock::new();
        let cache = TranslationCache::with_clock(Some(Duration::from_secs(1)), clock.clone());

        cache.insert(text_key("welcome"), "value");
        assert_eq!(cache.len(), 1);

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get(&text_key("welcome")), None);
        // Lazy eviction removed it on read
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_reinsert_after_expiry_resets_ttl() {
        let clock = ManualClock::new();
        let cache = TranslationCache::with_clock(Some(Duration::from_secs(5)), clock.clone());

        cache.insert(text_key("welcome"), "old");
        clock.advance(Duration::from_secs(6));
        assert_eq!(cache.get(&text_key("welcome")), None);

        cache.insert(text_key("welcome"), "new");
        clock.advance(Duration::from_secs(4));
        assert_eq!(cache.get(&text_key("welcome")), Some("new".to_string()));
    }

    // ==================== Session Variant Tests ====================

    #[test]
    fn test_session_cache_never_expires() {
        let clock = ManualClock::new();
        let cache = TranslationCache::with_clock(None, clock.clone());

        cache.insert(text_key("welcome"), "value");
        clock.advance(Duration::from_secs(1_000_000));
        assert_eq!(cache.get(&text_key("welcome")), Some("value".to_string()));
    }

    #[test]
    fn test_session_cache_clear() {
        let cache = TranslationCache::session_scoped();
        cache.insert(text_key("a"), "1");
        cache.insert(text_key("b"), "2");
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&text_key("a")), None);
    }

    // ==================== Key Construction Tests ====================

    #[test]
    fn test_text_key_folds_whitespace_and_case() {
        let a = CacheKey::for_text(Some("en"), "hi", "Hello World");
        let b = CacheKey::for_text(Some("en"), "hi", "  hello world \n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_key_absent_source_is_auto() {
        let a = CacheKey::for_text(None, "hi", "hello");
        let b = CacheKey::for_text(Some("auto"), "hi", "hello");
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_key_distinguishes_languages() {
        let a = CacheKey::for_text(Some("en"), "hi", "hello");
        let b = CacheKey::for_text(Some("en"), "ta", "hello");
        let c = CacheKey::for_text(Some("hi"), "ta", "hello");
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_symbolic_key_is_exact_match() {
        let a = CacheKey::for_key("en", "hi", "Welcome");
        let b = CacheKey::for_key("en", "hi", "welcome");
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_text_key_ignores_padding(text in "[ -~]{0,40}") {
            let plain = CacheKey::for_text(Some("en"), "hi", &text);
            let padded = CacheKey::for_text(Some("en"), "hi", &format!("  {}\t", text));
            prop_assert_eq!(plain, padded);
        }

        #[test]
        fn prop_text_key_ignores_ascii_case(text in "[ -~]{0,40}") {
            let lower = CacheKey::for_text(Some("en"), "hi", &text.to_lowercase());
            let upper = CacheKey::for_text(Some("en"), "hi", &text.to_uppercase());
            prop_assert_eq!(lower, upper);
        }
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_concurrent_writes_same_key() {
        let cache = Arc::new(TranslationCache::process_scoped(Duration::from_secs(60)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache.insert(text_key("welcome"), format!("value-{}", i));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Exactly one entry survives; which writer won is unspecified
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&text_key("welcome")).is_some());
    }
}
