//! Remote translation provider: a LibreTranslate-compatible HTTP client.
//!
//! This is the only component that touches the network. Every request
//! carries a bounded timeout, translation attempts are retried only for
//! transient failures, and language detection never errors at all (it
//! degrades to the canonical language). Empty input short-circuits
//! without a network call.

use crate::config::Config;
use crate::error::ProviderError;
use crate::i18n::{Language, TranslationMetrics};
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectCandidate {
    language: String,
}

/// Client for the machine-translation backend.
pub struct RemoteTranslator {
    client: reqwest::Client,
    translate_url: String,
    detect_url: String,
    retry: RetryConfig,
}

impl RemoteTranslator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .context("Failed to build provider HTTP client")?;

        Ok(Self {
            client,
            translate_url: config.provider_url.clone(),
            detect_url: config.provider_detect_url(),
            retry: RetryConfig::provider_call(),
        })
    }

    /// Translate `text` from `source` (or `auto` when absent) into
    /// `target`.
    ///
    /// Whitespace-only input is returned unchanged without a network
    /// call. Transient failures (network, 429, 5xx) are retried; the
    /// error returned after that is for the caller to degrade on, and a
    /// failure is also counted in the metrics so the degradation stays
    /// observable.
    pub async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let metrics = TranslationMetrics::global();
        metrics.record_provider_call();

        let result = with_retry_if(
            &self.retry,
            &format!("Translation to '{}'", target),
            || self.attempt_translate(text, source, target),
            ProviderError::is_retryable,
        )
        .await;

        if let Err(e) = &result {
            metrics.record_provider_failure();
            warn!("Provider translation to '{}' failed: {}", target, e);
        }

        result
    }

    async fn attempt_translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            q: text,
            source: source.unwrap_or("auto"),
            target,
            format: "text",
        };

        let response = self
            .client
            .post(&self.translate_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let parsed: TranslateResponse = response.json().await?;

        // A success response without the field still yields usable text
        Ok(parsed.translated_text.unwrap_or_else(|| text.to_string()))
    }

    /// Best-effort source-language detection.
    ///
    /// Any failure (network, bad status, unusable payload, unsupported
    /// detected language) degrades to the canonical language so
    /// resolution is never blocked on detection.
    pub async fn detect(&self, text: &str) -> Language {
        match self.attempt_detect(text).await {
            Ok(code) => Language::normalize(Some(&code)),
            Err(e) => {
                TranslationMetrics::global().record_detect_failure();
                warn!(
                    "Language detection failed ({}), defaulting to '{}'",
                    e,
                    Language::canonical().code()
                );
                Language::canonical()
            }
        }
    }

    async fn attempt_detect(&self, text: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.detect_url)
            .json(&DetectRequest { q: text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status { status, body });
        }

        let candidates: Vec<DetectCandidate> = response.json().await?;
        candidates
            .into_iter()
            .next()
            .map(|c| c.language)
            .ok_or_else(|| ProviderError::Payload("empty detection result".to_string()))
    }
}

impl std::fmt::Debug for RemoteTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTranslator")
            .field("translate_url", &self.translate_url)
            .field("detect_url", &self.detect_url)
            .finish()
    }
}
