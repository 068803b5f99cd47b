//! LLM client module for TripPlan
//!
//! Provides the completion abstraction and the Groq implementation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod groq;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use groq::GroqClient;
#[allow(unused_imports)]
pub use types::Role;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, StopReason, TokenUsage, ToolCall,
    ToolDefinition,
};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Currently only "groq" is supported.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "groq" => {
            debug!("create_client: creating Groq client");
            Ok(Arc::new(GroqClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: groq",
                other
            )))
        }
    }
}
