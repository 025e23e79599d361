//! HTTP surface: translate, health, languages, and metrics endpoints.
//!
//! The translate endpoint is the network boundary described by the error
//! design: malformed requests get 4xx envelopes and a provider failure
//! gets 500 here, while everything downstream of a well-formed request
//! (normalization, detection) degrades instead of erroring.

use crate::config::Config;
use crate::i18n::{Language, LanguageRegistry, TranslationMetrics};
use crate::resolver::Resolver;
use crate::security::api_key_authorized;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<Resolver>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Arc<Config>, resolver: Arc<Resolver>) -> Self {
        Self {
            config,
            resolver,
            started_at: Utc::now(),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/health", get(health))
        .route("/api/languages", get(languages))
        .route("/api/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody {
    text: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: String,
    detected_source: String,
    cached: bool,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorReply {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TranslateBody>,
) -> Response {
    let Some(text) = body.text.as_deref().filter(|t| !t.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid or missing \"text\"");
    };
    let Some(target_raw) = body.target_lang.as_deref().filter(|t| !t.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing or invalid \"targetLang\"");
    };

    let provided_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if !api_key_authorized(state.config.api_key.as_deref(), provided_key) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid or missing API key");
    }

    // Unsupported targets coerce to the default rather than erroring
    let target = Language::normalize(Some(target_raw));

    match state
        .resolver
        .translate_text(text, body.source_lang.as_deref(), target)
        .await
    {
        Ok(result) => Json(TranslateReply {
            translated_text: result.text,
            detected_source: result.detected_source,
            cached: result.cached,
        })
        .into_response(),
        Err(e) => {
            error!("Translation request failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Translation failed")
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReply {
    status: &'static str,
    provider: &'static str,
    uptime_secs: i64,
}

async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok",
        provider: "libretranslate",
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
}

#[derive(Debug, Serialize)]
struct LanguagesReply {
    languages: Vec<LanguageEntry>,
}

async fn languages() -> Json<LanguagesReply> {
    let languages = LanguageRegistry::get()
        .list_enabled()
        .into_iter()
        .map(|lang| LanguageEntry {
            code: lang.code,
            name: lang.name,
            native_name: lang.native_name,
        })
        .collect();
    Json(LanguagesReply { languages })
}

async fn metrics() -> Response {
    Json(TranslationMetrics::global().report()).into_response()
}
