//! Long running operation under the global budget.

use std::time::Duration;

use axum::extract::State;
use axum::Json;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::schemas::MessageResponse;

/// Stand-in for a slow backend call.
async fn dummy_task(delay: Duration) -> Result<String, ApiError> {
    tokio::time::sleep(delay).await;
    Ok("i did it!".to_string())
}

#[utoipa::path(
    get,
    path = "/long-running-operation",
    operation_id = "longRunningOperation",
    tag = "operations",
    responses(
        (status = 200, description = "The operation finished within the budget", body = MessageResponse),
        (status = 500, description = "The operation ran out of time", body = MessageResponse,
            example = json!({ "message": "timed out!" })),
    )
)]
pub async fn long_running_operation(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let delay = Duration::from_millis(state.config.timeouts.demo_delay_ms);

    let message = state
        .runner
        .run_bounded(move || dummy_task(delay))
        .await
        .into_result()?;

    Ok(Json(MessageResponse::new(message)))
}
