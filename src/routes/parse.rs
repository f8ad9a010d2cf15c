//! Parse endpoint: detect platform, forward to its upstream, normalize

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use serde_json::Value;
use std::sync::Arc;

use crate::AppState;
use crate::constants::{CODE_BAD_REQUEST, CODE_METHOD_NOT_ALLOWED, CODE_OK, MSG_METHOD_NOT_ALLOWED};
use crate::domain::normalize::normalize;
use crate::domain::platform::Platform;
use crate::models::{ParseRequest, ParseResult, SubmittedUrl};
use crate::services::error::ParseError;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/parse", post(parse).get(method_not_allowed))
}

/// POST /api/parse - Always answers 200; the envelope `code` carries the outcome
async fn parse(State(state): State<Arc<AppState>>, body: Bytes) -> Json<ParseResult> {
    let result = match parse_url(&state, &body).await {
        Ok(result) => result,
        Err(err) => {
            if err.code() == CODE_BAD_REQUEST {
                tracing::warn!(error = %err, "[parse] rejected");
            } else {
                tracing::error!(error = %err, "[parse] failed");
            }
            err.into()
        }
    };

    Json(result)
}

async fn parse_url(state: &AppState, body: &[u8]) -> Result<ParseResult, ParseError> {
    let body: Value = serde_json::from_slice(body)?;
    if body.is_null() {
        return Err(ParseError::NullBody);
    }

    let request = ParseRequest::new(body);
    let url = match request.url() {
        SubmittedUrl::Url(url) => url,
        SubmittedUrl::Missing => return Err(ParseError::MissingUrl),
        SubmittedUrl::NotAString => return Err(ParseError::UnsupportedPlatform),
    };

    let platform = Platform::detect(url).ok_or(ParseError::UnsupportedPlatform)?;
    let endpoint = state
        .platforms
        .endpoint(platform)
        .ok_or(ParseError::EndpointNotConfigured(platform))?;

    tracing::info!(%platform, "[parse] forwarding to upstream");

    let response = state.upstream.fetch(endpoint, url).await?;
    let result = normalize(platform, &response);
    if result.code != CODE_OK {
        return Err(ParseError::UpstreamRejected);
    }

    Ok(result)
}

/// GET /api/parse - Only POST is supported
async fn method_not_allowed() -> Json<ParseResult> {
    Json(ParseResult::failure(
        CODE_METHOD_NOT_ALLOWED,
        MSG_METHOD_NOT_ALLOWED,
    ))
}
