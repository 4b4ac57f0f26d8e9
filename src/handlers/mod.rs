// handlers/mod.rs - Request handlers by security tier
//
// Public (no token) and protected (role gated through middleware::authorization).
// Every handler binds the body, validates it against its schema, then calls a
// use-case from crate::services.
pub mod protected;
pub mod public;

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequestParts},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderMap, Method, Uri,
    },
};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt::Display;

use crate::error::ApiError;
use crate::validation::{lookup, Schema};

const REDACTED: &str = "[REDACTED]";

/// Request line and headers, kept for logging unexpected failures
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        })
    }
}

/// Bind the body as a JSON object.
///
/// An empty body and a `null` body bind as an empty object, so the schema reports
/// each required field. A non-JSON content type, malformed JSON and any other
/// non-object payload are all reported as unbindable.
pub fn bind_object(
    headers: &HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Map<String, Value>, ApiError> {
    let bytes = payload.map_err(|rejection| {
        tracing::debug!("Unreadable request body: {}", rejection);
        ApiError::unbindable_body()
    })?;

    if bytes.is_empty() {
        return Ok(Map::new());
    }

    if !is_json_content_type(headers) {
        tracing::debug!("Request body is not declared as JSON");
        return Err(ApiError::unbindable_body());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(body)) => Ok(body),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => {
            tracing::debug!("Request body is not an object: {}", other);
            Err(ApiError::unbindable_body())
        }
        Err(e) => {
            tracing::debug!("Malformed JSON body: {}", e);
            Err(ApiError::unbindable_body())
        }
    }
}

/// Bind and validate in one step
pub fn bind_valid(
    schema: &Schema,
    headers: &HeaderMap,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Map<String, Value>, ApiError> {
    let body = bind_object(headers, payload)?;
    let errors = schema.validate(&body);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }
    Ok(body)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

/// String field of a validated body
pub fn text(body: &Map<String, Value>, name: &str) -> String {
    lookup(body, name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Whole-number field of a validated body
pub fn whole_number(body: &Map<String, Value>, name: &str) -> f64 {
    lookup(body, name).and_then(Value::as_f64).unwrap_or_default()
}

/// Log an unexpected failure with its request and hide it behind a generic 500
pub fn unexpected(
    ctx: &RequestContext,
    body: Option<&Map<String, Value>>,
    err: &dyn Display,
) -> ApiError {
    let headers = redacted_headers(&ctx.headers);
    let body = body.map(redacted_body).unwrap_or_default();

    tracing::error!(
        method = %ctx.method,
        uri = %ctx.uri,
        headers = ?headers,
        body = %body,
        error = %err,
        "Unexpected error while handling request"
    );
    ApiError::InternalServerError
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

fn redacted_body(body: &Map<String, Value>) -> Value {
    let mut body = body.clone();
    for (key, value) in body.iter_mut() {
        if key.eq_ignore_ascii_case("password") {
            *value = Value::String(REDACTED.to_string());
        }
    }
    Value::Object(body)
}
