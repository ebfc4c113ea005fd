//! LLM Gateway port
//!
//! Defines the interface for querying a chat-completion provider.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One single-turn completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Opaque model identifier
    pub model: String,
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Gateway for LLM communication
///
/// Timeouts are applied by the caller, so implementations only need to
/// report transport and provider failures.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the raw response text
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
