//! Request and response bodies shared by the routes and the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::completion::ChatMessage;

/// Every successful response, and every failure, is a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NameRequest {
    pub name: String,
}

/// Multipart upload form. Only used to describe the body in the document.
#[derive(Debug, ToSchema)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,

    /// Falls back to the configured default model.
    #[serde(default)]
    pub model: Option<String>,
}
