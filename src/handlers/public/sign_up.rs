// handlers/public/sign_up.rs - POST /api/sign-up

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{bind_valid, text, unexpected, RequestContext};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{SignUpError, SignUpInput};

const INVALID_EMAIL_MESSAGE: &str = "email address is invalid. Please enter a valid email address";
const EMAIL_TAKEN_MESSAGE: &str = "this email address is already in use. \
     Please use a different email or login to your existing account";

/// Register a customer account.
///
/// Body: `{ "name": string, "email": string, "password": string }`.
/// Responds 201 with a confirmation message.
pub async fn sign_up_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Bytes, BytesRejection>,
) -> ApiResult<&'static str> {
    let body = bind_valid(&state.schemas.sign_up, &ctx.headers, payload)?;

    let input = SignUpInput {
        name: text(&body, "name"),
        email: text(&body, "email"),
        password: text(&body, "password"),
    };

    match state.sign_up.sign_up(input).await {
        Ok(()) => Ok(ApiResponse::created("customer sign up successfully")),
        Err(err @ (SignUpError::NameTooShort | SignUpError::PasswordTooShort)) => {
            Err(ApiError::bad_request(err.to_string()))
        }
        Err(SignUpError::InvalidEmail) => Err(ApiError::bad_request(INVALID_EMAIL_MESSAGE)),
        Err(SignUpError::EmailTaken) => Err(ApiError::conflict(EMAIL_TAKEN_MESSAGE)),
        Err(err) => Err(unexpected(&ctx, Some(&body), &err)),
    }
}
