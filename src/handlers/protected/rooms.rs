// handlers/protected/rooms.rs - Room inventory

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::app::AppState;
use crate::database::models::Room;
use crate::error::ApiError;
use crate::handlers::{bind_valid, text, unexpected, whole_number, RequestContext};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CreateRoomError, CreateRoomInput};

/// POST /api/create-room (ADMIN)
///
/// Body: `{ "number": string, "type": string, "capacity": integer, "price": integer }`.
/// Responds 201 with `data: null`. Duplicate numbers and room rule violations are 409.
pub async fn create_room_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Bytes, BytesRejection>,
) -> ApiResult<()> {
    let body = bind_valid(&state.schemas.create_room, &ctx.headers, payload)?;

    // Bounds are already enforced by the schema
    let input = CreateRoomInput {
        number: text(&body, "number"),
        room_type: text(&body, "type"),
        capacity: whole_number(&body, "capacity") as u16,
        price: whole_number(&body, "price") as u64,
    };

    match state.rooms.create_room(input).await {
        Ok(_) => Ok(ApiResponse::created(())),
        Err(err @ (CreateRoomError::NumberTaken(_) | CreateRoomError::Invalid(_))) => {
            Err(ApiError::conflict(err.to_string()))
        }
        Err(err) => Err(unexpected(&ctx, Some(&body), &err)),
    }
}

/// GET /api/rooms (CUSTOMER or ADMIN)
pub async fn rooms_get(State(state): State<AppState>, ctx: RequestContext) -> ApiResult<Vec<Room>> {
    match state.rooms.list_rooms().await {
        Ok(rooms) => Ok(ApiResponse::ok(rooms)),
        Err(err) => Err(unexpected(&ctx, None, &err)),
    }
}
