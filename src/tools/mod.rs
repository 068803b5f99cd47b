//! Tool system for the travel agent
//!
//! Tools give the agent capabilities beyond text generation. TripPlan ships
//! one builtin: live web search, so the model can verify current information
//! and produce real links.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

mod web_search;

pub use web_search::WebSearchTool;

use crate::llm::ToolDefinition;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value) -> ToolResult;

    /// Definition to advertise to the LLM
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("found it");
        assert_eq!(result.content, "found it");
        assert!(!result.is_error);
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("nope");
        assert_eq!(result.content, "nope");
        assert!(result.is_error);
    }
}
