//! Greeting examples.

use axum::extract::Path;
use axum::Json;

use crate::http::request::ValidJson;
use crate::http::response::ApiError;
use crate::routes::timestamp;
use crate::schemas::{MessageResponse, NameRequest};

#[utoipa::path(
    get,
    path = "/hello",
    operation_id = "hello",
    tag = "hello",
    responses(
        (status = 200, description = "Respond to a message", body = MessageResponse),
    )
)]
pub async fn hello() -> Result<Json<MessageResponse>, ApiError> {
    Ok(Json(MessageResponse::new(format!("hello, the time is: {}", timestamp()?))))
}

#[utoipa::path(
    get,
    path = "/hello/{name}",
    operation_id = "helloName",
    tag = "hello",
    params(("name" = String, Path, description = "Who to greet")),
    responses(
        (status = 200, description = "Respond a message", body = MessageResponse),
    )
)]
pub async fn hello_name(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("hello {name}")))
}

#[utoipa::path(
    post,
    path = "/hello",
    operation_id = "helloPost",
    tag = "hello",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Respond a message [post]", body = MessageResponse),
        (status = 400, description = "Invalid body", body = MessageResponse),
    )
)]
pub async fn hello_post(ValidJson(body): ValidJson<NameRequest>) -> Json<MessageResponse> {
    tracing::debug!(name = %body.name, "Greeting posted name");
    Json(MessageResponse::new(format!("hello {}", body.name)))
}
