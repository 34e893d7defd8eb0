//! Chat completion pass-through under the global budget.

use axum::extract::State;
use axum::Json;

use crate::http::request::ValidJson;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::schemas::{CompletionRequest, MessageResponse};

#[utoipa::path(
    post,
    path = "/api/completion",
    operation_id = "createCompletion",
    tag = "completion",
    security(("Bearer" = [])),
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "Content of the first choice", body = MessageResponse),
        (status = 400, description = "Invalid body", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token", body = MessageResponse),
        (status = 500, description = "Timed out or provider unavailable", body = MessageResponse),
    )
)]
pub async fn create_completion(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CompletionRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.messages.is_empty() {
        return Err(ApiError::bad_request("messages must not be empty"));
    }

    let model = request
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.completion.default_model.clone());
    let messages = request.messages;
    let client = state.completion.clone();

    let choice = state
        .runner
        .run_cancellable(move |cancel| async move {
            tokio::select! {
                result = client.complete(&messages, &model) => result.map_err(ApiError::from),
                _ = cancel.cancelled() => {
                    tracing::debug!(model = %model, "Dropping abandoned completion request");
                    Err(ApiError::internal("completion abandoned"))
                }
            }
        })
        .await
        .into_result()?;

    Ok(Json(MessageResponse::new(choice.message.content.unwrap_or_default())))
}
