//! Error handling utilities for the parse route

use thiserror::Error;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_SERVER_ERROR, MSG_ENDPOINT_NOT_CONFIGURED, MSG_MISSING_URL,
    MSG_SERVER_ERROR, MSG_UNSUPPORTED_PLATFORM, MSG_UPSTREAM_REJECTED,
};
use crate::domain::platform::Platform;
use crate::models::ParseResult;
use crate::services::upstream::UpstreamError;

/// Every way a parse request can fail. `Display` carries the internal detail
/// for logs; callers only ever see `message()`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("request carried no url")]
    MissingUrl,

    #[error("no platform matched the submitted url")]
    UnsupportedPlatform,

    #[error("no upstream endpoint configured for {0}")]
    EndpointNotConfigured(Platform),

    #[error("upstream reported failure")]
    UpstreamRejected,

    #[error("upstream transport failed: {0}")]
    Transport(#[from] UpstreamError),

    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("request body is JSON null")]
    NullBody,
}

impl ParseError {
    pub fn code(&self) -> u16 {
        match self {
            ParseError::MissingUrl | ParseError::UnsupportedPlatform | ParseError::UpstreamRejected => {
                CODE_BAD_REQUEST
            }
            ParseError::EndpointNotConfigured(_)
            | ParseError::Transport(_)
            | ParseError::InvalidBody(_)
            | ParseError::NullBody => CODE_SERVER_ERROR,
        }
    }

    /// Fixed user-facing message. Never includes upstream or internal detail.
    pub fn message(&self) -> &'static str {
        match self {
            ParseError::MissingUrl => MSG_MISSING_URL,
            ParseError::UnsupportedPlatform => MSG_UNSUPPORTED_PLATFORM,
            ParseError::EndpointNotConfigured(_) => MSG_ENDPOINT_NOT_CONFIGURED,
            ParseError::UpstreamRejected => MSG_UPSTREAM_REJECTED,
            ParseError::Transport(_) | ParseError::InvalidBody(_) | ParseError::NullBody => {
                MSG_SERVER_ERROR
            }
        }
    }
}

impl From<ParseError> for ParseResult {
    fn from(err: ParseError) -> Self {
        ParseResult::failure(err.code(), err.message())
    }
}
