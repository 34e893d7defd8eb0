//! Chat completion pass-through.
//!
//! # Responsibilities
//! - Forward a conversation to an OpenAI-compatible provider
//! - Return the first choice unchanged
//!
//! # Design Decisions
//! - Behind a trait so handlers and tests can swap the provider
//! - No retries; the caller bounds the wait with the bounded runner

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::OpenAiClient;
pub use error::CompletionError;
pub use types::{ChatChoice, ChatMessage, ChoiceMessage, Role};

/// A provider of chat completions.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Complete `messages` with `model` and return the first choice.
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<ChatChoice, CompletionError>;
}
