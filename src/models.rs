//! Request and response shapes for the parse route

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::constants::CODE_OK;

/// Body of `POST /api/parse`, kept as raw JSON. Only an object can carry a
/// `url`; arrays and primitives are treated as a body without one.
#[derive(Debug)]
pub struct ParseRequest {
    body: Value,
}

/// What the `url` member of a request holds.
#[derive(Debug, PartialEq)]
pub enum SubmittedUrl<'a> {
    /// Absent, `null`, `false`, `0` or `""`
    Missing,
    Url(&'a str),
    /// Some other value; it can never name a supported platform
    NotAString,
}

impl ParseRequest {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn url(&self) -> SubmittedUrl<'_> {
        match self.body.as_object().and_then(|body| body.get("url")) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => SubmittedUrl::Missing,
            Some(Value::String(url)) if url.is_empty() => SubmittedUrl::Missing,
            Some(Value::String(url)) => SubmittedUrl::Url(url),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => SubmittedUrl::Missing,
            Some(_) => SubmittedUrl::NotAString,
        }
    }
}

/// Uniform envelope returned for every `/api/parse` call. Transport status is
/// always 200; `code` carries the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParseData>,
}

impl ParseResult {
    pub fn success(data: ParseData) -> Self {
        Self {
            code: CODE_OK,
            msg: None,
            data: Some(data),
        }
    }

    pub fn failure(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: Some(msg.into()),
            data: None,
        }
    }
}

/// Normalized media description. At most one of `url`, `images`, `imgurl`
/// and `quality_urls` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imgurl: Option<Vec<String>>,
    /// Quality label to media URL, in upstream order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_urls: Option<IndexMap<String, String>>,
}
