//! Prompt dispatching for plan generation and follow-up questions

mod dispatcher;
pub mod prompts;

pub use dispatcher::{PlanDispatcher, PlannerError, UserInputError, normalize};
pub use prompts::{PLAN_SECTIONS, SYSTEM_INSTRUCTIONS};

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::debug;

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::create_client;
use crate::tools::{Tool, WebSearchTool};

/// Build the travel-agent dispatcher from configuration
///
/// Wires the Groq client and the web search tool into an agent carrying the
/// fixed travel instruction set.
pub fn build_dispatcher(config: &Config) -> Result<PlanDispatcher> {
    debug!("build_dispatcher: called");
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;

    let search: Arc<dyn Tool> =
        Arc::new(WebSearchTool::from_config(&config.search).context("Failed to create web search tool")?);

    let agent = Agent::new(
        llm,
        vec![search],
        SYSTEM_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
        config.llm.max_tokens,
    );

    Ok(PlanDispatcher::new(agent))
}
