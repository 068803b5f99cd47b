//! TripPlan - AI travel planner for the terminal
//!
//! TripPlan collects trip parameters through an interactive form, forwards a
//! templated prompt to an LLM agent with live web search, and renders the
//! returned markdown plan. A follow-up panel lets the user ask one-off
//! questions against the most recently generated plan.
//!
//! # Core Concepts
//!
//! - **One call per action**: every button press is a single blocking agent
//!   request; no streaming, no concurrent requests
//! - **Session-only state**: the last plan and the follow-up latch live in
//!   memory and die with the session
//! - **Typed boundaries**: dispatcher operations return `Result`, input
//!   problems never reach the network
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and Groq implementation
//! - [`tools`] - Tool system (web search)
//! - [`agent`] - Tool-use loop over an LLM client
//! - [`domain`] - Trip parameters and session state
//! - [`planner`] - Prompt templates and the dispatcher
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Interactive terminal form

pub mod agent;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod tools;
pub mod tui;

// Re-export commonly used types
pub use agent::{Agent, AgentError};
pub use config::{Config, LlmConfig, SearchConfig};
pub use domain::{BudgetTier, SessionState, TravelStyle, TripParameters};
pub use llm::{CompletionRequest, CompletionResponse, GroqClient, LlmClient, LlmError, create_client};
pub use planner::{PlanDispatcher, PlannerError, UserInputError, normalize};
pub use tools::{Tool, ToolResult, WebSearchTool};
