//! Multipart upload example.

use axum::extract::Multipart;
use axum::Json;

use crate::http::response::ApiError;
use crate::schemas::{ImageUpload, MessageResponse};

const IMAGE_FIELD: &str = "image";

#[utoipa::path(
    post,
    path = "/image",
    operation_id = "imagePost",
    tag = "hello",
    request_body(content = ImageUpload, description = "body", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Respond a message [post]", body = MessageResponse),
        (status = 400, description = "Missing or unreadable image field", body = MessageResponse),
    )
)]
pub async fn image_post(mut multipart: Multipart) -> Result<Json<MessageResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let bytes = field.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "Image received");
        return Ok(Json(MessageResponse::new(format!("hello {}", bytes.len()))));
    }

    Err(ApiError::bad_request("missing multipart field 'image'"))
}
