//! PlanDispatcher - gates user input, templates prompts, calls the agent
//!
//! The dispatcher owns the two operations the UI exposes: generating a plan
//! and answering a follow-up question. Input problems are caught here and
//! never produce an agent call; agent failures surface as a single error the
//! presentation layer turns into one message.

use thiserror::Error;
use tracing::{debug, info};

use crate::agent::{Agent, AgentError};
use crate::domain::TripParameters;

use super::prompts;

/// Input problems the user can fix; reported as inline warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserInputError {
    #[error("Please enter a destination first.")]
    MissingDestination,

    #[error("Please ask a question.")]
    MissingQuestion,

    #[error("Generate your travel plan first.")]
    NoPlanYet,
}

/// Errors from dispatcher operations
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    UserInput(#[from] UserInputError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Prompt template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl PlannerError {
    /// Input errors are non-fatal warnings; everything else is a service error
    pub fn is_user_input(&self) -> bool {
        matches!(self, PlannerError::UserInput(_))
    }
}

/// Dispatches templated prompts to the travel agent
pub struct PlanDispatcher {
    agent: Agent,
}

impl PlanDispatcher {
    /// Create a dispatcher around an already-built agent
    pub fn new(agent: Agent) -> Self {
        debug!("PlanDispatcher::new: called");
        Self { agent }
    }

    /// Generate a full travel plan for the given parameters
    ///
    /// Returns the normalized markdown. The caller stores it into
    /// `SessionState` on success; on failure session state is untouched, so a
    /// previously generated plan survives a failed regeneration.
    pub async fn generate_plan(&self, params: &TripParameters) -> Result<String, PlannerError> {
        debug!(destination = %params.destination, duration = params.duration_days(), "generate_plan: called");
        if params.destination.trim().is_empty() {
            debug!("generate_plan: missing destination, no agent call");
            return Err(UserInputError::MissingDestination.into());
        }

        let prompt = prompts::render_plan_prompt(params)?;
        let raw = self.agent.run(&prompt).await?;
        let plan = normalize(&raw);
        info!(
            destination = %params.destination,
            plan_len = plan.len(),
            "generate_plan: plan generated"
        );
        Ok(plan)
    }

    /// Answer a follow-up question against the most recent plan
    ///
    /// Returns the raw (non-normalized) answer; never persisted. Both gates
    /// are checked before any agent call, with distinct warnings for
    /// "no plan yet" and "empty question".
    pub async fn answer_followup(&self, question: &str, prior_plan: &str) -> Result<String, PlannerError> {
        debug!(question_len = question.len(), plan_len = prior_plan.len(), "answer_followup: called");
        if prior_plan.trim().is_empty() {
            debug!("answer_followup: no plan yet, no agent call");
            return Err(UserInputError::NoPlanYet.into());
        }
        if question.trim().is_empty() {
            debug!("answer_followup: empty question, no agent call");
            return Err(UserInputError::MissingQuestion.into());
        }

        let prompt = prompts::render_followup_prompt(question, prior_plan)?;
        let answer = self.agent.run(&prompt).await?;
        info!(answer_len = answer.len(), "answer_followup: answered");
        Ok(answer)
    }
}

/// Normalize agent output for display
///
/// Replaces the U+2223 pipe lookalike with an ASCII pipe (so markdown tables
/// render) and collapses any run of three-or-more newlines to exactly two.
/// Idempotent: runs of any length collapse fully in one pass.
pub fn normalize(text: &str) -> String {
    debug!(text_len = text.len(), "normalize: called");
    let mut out = text.replace('\u{2223}', "|");
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    out
}
