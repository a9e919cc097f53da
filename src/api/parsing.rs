//! Event parsing and request normalization.

use serde_json::{Map, Value};

use crate::core::models::{
    AnalysisRequest, DEFAULT_APP_NAME, DEFAULT_ENVIRONMENT, DEFAULT_INPUT_TYPE, DEFAULT_LANGUAGE,
};
use crate::errors::SecureFlowError;

pub const MIN_CONTENT_CHARS: usize = 10;
pub const INVALID_CONTENT_MESSAGE: &str = "content is required (min 10 characters)";

/// The inbound body as a JSON payload plus its raw text for audit logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
    pub payload: Value,
    pub raw: String,
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of a REST (`httpMethod`) or HTTP API v2 event.
pub fn http_method(event: &Value) -> Option<&str> {
    v_str(event, &["httpMethod"]).or_else(|| v_str(event, &["requestContext", "http", "method"]))
}

#[must_use]
pub fn is_preflight(event: &Value) -> bool {
    http_method(event).is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
}

/// Reads a query parameter from `queryStringParameters`, falling back to the
/// URL-decoded `rawQueryString`.
#[must_use]
pub fn query_param(event: &Value, name: &str) -> Option<String> {
    if let Some(v) = v_str(event, &["queryStringParameters", name]) {
        return Some(v.to_string());
    }
    let raw = v_str(event, &["rawQueryString"])?;
    url::form_urlencoded::parse(raw.as_bytes())
        .find(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.into_owned())
}

/// Decodes the event body.
///
/// An absent body is an empty object. A string body is parsed as JSON; if
/// that fails the text is kept only as `raw`. A structured body is used as
/// is and serialized for `raw`.
#[must_use]
pub fn parse_body(event: &Value) -> ParsedBody {
    match event.get("body") {
        None | Some(Value::Null) => ParsedBody {
            payload: Value::Object(Map::new()),
            raw: String::new(),
        },
        Some(Value::String(body)) => ParsedBody {
            payload: serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Map::new())),
            raw: body.clone(),
        },
        Some(other) => ParsedBody {
            payload: other.clone(),
            raw: other.to_string(),
        },
    }
}

fn field_or(obj: Option<&Value>, key: &str, default: &str) -> String {
    match obj.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Builds an [`AnalysisRequest`] from a decoded payload.
///
/// # Errors
///
/// Returns [`SecureFlowError::InvalidRequest`] when `content` is not a string
/// holding at least ten characters after trimming.
pub fn normalize_request(payload: &Value) -> Result<AnalysisRequest, SecureFlowError> {
    let root = payload.as_object().map(|_| payload);
    let context = root
        .and_then(|p| p.get("context"))
        .filter(|c| c.is_object());

    let content = match root.and_then(|p| p.get("content")) {
        Some(Value::String(s)) if s.trim().chars().count() >= MIN_CONTENT_CHARS => s.clone(),
        _ => return Err(SecureFlowError::InvalidRequest(INVALID_CONTENT_MESSAGE.to_string())),
    };

    Ok(AnalysisRequest {
        input_type: field_or(root, "input_type", DEFAULT_INPUT_TYPE),
        language: field_or(root, "language", DEFAULT_LANGUAGE),
        content,
        app_name: field_or(context, "app_name", DEFAULT_APP_NAME),
        environment: field_or(context, "environment", DEFAULT_ENVIRONMENT),
    })
}
