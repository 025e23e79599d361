//! Internationalization support: the supported-language set and its
//! observability.
//!
//! - `registry`: single source of truth for supported languages
//! - `language`: validated `Language` type plus locale normalization
//! - `metrics`: counters for cache/bundle/provider behavior

mod language;
mod metrics;
mod registry;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
