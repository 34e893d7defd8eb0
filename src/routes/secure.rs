//! Bearer protected greeting.

use axum::Json;

use crate::http::response::ApiError;
use crate::routes::timestamp;
use crate::schemas::MessageResponse;

#[utoipa::path(
    get,
    path = "/api/hello",
    operation_id = "authHello",
    tag = "auth",
    security(("Bearer" = [])),
    responses(
        (status = 200, description = "Respond to an authenticated message", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token", body = MessageResponse),
    )
)]
pub async fn auth_hello() -> Result<Json<MessageResponse>, ApiError> {
    Ok(Json(MessageResponse::new(format!(
        "hello authenticated user, the time is: {}",
        timestamp()?
    ))))
}
