// handlers/public/login.rs - POST /api/login-with-email-and-password

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{bind_valid, text, unexpected, RequestContext};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{LoginError, LoginOutput};

/// Exchange email and password for a CUSTOMER access token.
///
/// Responds 200 with `{ customerId, customerName, accessToken }`.
pub async fn login_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Bytes, BytesRejection>,
) -> ApiResult<LoginOutput> {
    let body = bind_valid(&state.schemas.login, &ctx.headers, payload)?;

    match state.login.login(&text(&body, "email"), &text(&body, "password")).await {
        Ok(output) => Ok(ApiResponse::ok(output)),
        Err(err @ LoginError::InvalidCredentials) => Err(ApiError::unauthorized(err.to_string())),
        Err(err) => Err(unexpected(&ctx, Some(&body), &err)),
    }
}
