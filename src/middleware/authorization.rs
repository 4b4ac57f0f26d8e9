use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{Role, TokenAuthorizer};
use crate::error::ApiError;

pub const MISSING_TOKEN_MESSAGE: &str = "missing or invalid authorization token";
pub const FORBIDDEN_MESSAGE: &str = "you do not have permission to access this resource";

/// Role gate for ADMIN-only routes
pub async fn require_admin(
    State(authorizer): State<TokenAuthorizer>,
    request: Request,
    next: Next,
) -> Response {
    gate(&authorizer, Role::Admin, request, next).await
}

/// Role gate for routes open to any CUSTOMER (admins included)
pub async fn require_customer(
    State(authorizer): State<TokenAuthorizer>,
    request: Request,
    next: Next,
) -> Response {
    gate(&authorizer, Role::Customer, request, next).await
}

async fn gate(
    authorizer: &TokenAuthorizer,
    required: Role,
    request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(request.headers()) {
        Some(token) => token,
        None => return ApiError::unauthorized(MISSING_TOKEN_MESSAGE).into_response(),
    };

    if !authorizer.permits(&token, required).await {
        tracing::debug!(
            "Denied {} {}: {} role required",
            request.method(),
            request.uri().path(),
            required
        );
        return ApiError::forbidden(FORBIDDEN_MESSAGE).into_response();
    }

    next.run(request).await
}

/// The raw header value is the token; there is no `Bearer ` scheme prefix.
/// Only an absent or empty header counts as missing. Bytes that are not visible
/// ASCII are kept (lossily) and fail verification instead.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.as_bytes())
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_raw_header_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static(""));
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers).as_deref(), Some("Bearer abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn opaque_header_bytes_are_still_a_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"tok\xe9n").unwrap());

        assert_eq!(extract_token(&headers).as_deref(), Some("tok\u{fffd}n"));
    }
}
