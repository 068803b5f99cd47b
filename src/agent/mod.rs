//! Agent - tool-use loop over an LLM client
//!
//! An [`Agent`] wires an [`LlmClient`] to a set of [`Tool`]s and a fixed
//! instruction set. `run` sends one prompt and drives the tool-use loop to
//! completion: when the model requests tool calls they are executed and the
//! results fed back, until the model ends its turn with text.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, ContentBlock, LlmClient, LlmError, Message, StopReason};
use crate::tools::{Tool, ToolResult};

/// Maximum tool-call rounds before the agent gives up
///
/// A travel plan needs a handful of searches at most; a model stuck in a
/// search loop should fail loudly instead of burning quota.
const MAX_TOOL_ROUNDS: u32 = 8;

/// Errors from running the agent
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Agent ended its turn without any text content")]
    EmptyResponse,

    #[error("Agent exceeded {0} tool-call rounds without answering")]
    TooManyToolRounds(u32),
}

/// An LLM plus tools plus instructions
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: Vec<Arc<dyn Tool>>,
    instructions: Vec<String>,
    max_tokens: u32,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Vec<Arc<dyn Tool>>,
        instructions: Vec<String>,
        max_tokens: u32,
    ) -> Self {
        debug!(
            tool_count = tools.len(),
            instruction_count = instructions.len(),
            max_tokens,
            "Agent::new: called"
        );
        Self {
            llm,
            tools,
            instructions,
            max_tokens,
        }
    }

    /// Run one prompt to completion and return the final text
    ///
    /// The response contract is typed: a turn that ends without text content
    /// is an [`AgentError::EmptyResponse`], never a stringly fallback.
    pub async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        debug!(prompt_len = prompt.len(), "run: called");
        let system_prompt = self.instructions.join("\n");
        let tool_defs = self.tools.iter().map(|t| t.definition()).collect::<Vec<_>>();

        let mut messages = vec![Message::user(prompt)];

        for round in 0..MAX_TOOL_ROUNDS {
            debug!(round, "run: requesting completion");
            let request = CompletionRequest {
                system_prompt: system_prompt.clone(),
                messages: messages.clone(),
                tools: tool_defs.clone(),
                max_tokens: self.max_tokens,
            };

            let response = self.llm.complete(request).await?;
            info!(
                round,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                stop_reason = ?response.stop_reason,
                "agent completion finished"
            );

            if response.tool_calls.is_empty() {
                debug!(round, "run: no tool calls, turn complete");
                return match response.content {
                    Some(text) if !text.trim().is_empty() => Ok(text),
                    _ => Err(AgentError::EmptyResponse),
                };
            }

            if response.stop_reason == StopReason::MaxTokens {
                warn!(round, "run: response truncated at max tokens while calling tools");
            }

            // Record the assistant turn (text, if any, plus its tool calls)
            let mut assistant_blocks = Vec::new();
            if let Some(text) = &response.content {
                assistant_blocks.push(ContentBlock::text(text.clone()));
            }
            for call in &response.tool_calls {
                assistant_blocks.push(ContentBlock::ToolUse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    input: call.input.clone(),
                });
            }
            messages.push(Message::assistant_blocks(assistant_blocks));

            // Execute each requested tool and feed the results back
            let mut result_blocks = Vec::new();
            for call in &response.tool_calls {
                debug!(tool = %call.name, id = %call.id, "run: executing tool");
                let result = self.execute_tool(&call.name, call.input.clone()).await;
                if result.is_error {
                    warn!(tool = %call.name, "tool returned error: {}", result.content);
                }
                result_blocks.push(ContentBlock::tool_result(
                    call.id.clone(),
                    result.content,
                    result.is_error,
                ));
            }
            messages.push(Message::user_blocks(result_blocks));
        }

        debug!("run: tool round limit exceeded");
        Err(AgentError::TooManyToolRounds(MAX_TOOL_ROUNDS))
    }

    /// Dispatch a tool call by name
    async fn execute_tool(&self, name: &str, input: serde_json::Value) -> ToolResult {
        debug!(%name, "execute_tool: called");
        match self.tools.iter().find(|t| t.name() == name) {
            Some(tool) => tool.execute(input).await,
            None => {
                debug!(%name, "execute_tool: unknown tool");
                ToolResult::error(format!("Unknown tool: {}", name))
            }
        }
    }
}
