use serde_json::{json, Value};

use crate::middleware::ApiResponse;

/// GET /health - liveness only, the stores are not probed
pub async fn health_get() -> ApiResponse<Value> {
    ApiResponse::ok(json!({ "status": "ok" }))
}
