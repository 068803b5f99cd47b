//! Session state - the last generated plan and the follow-up panel latch
//!
//! Explicit, passed-around state object; no ambient globals. Dies with the
//! session.

use tracing::debug;

/// Per-session UI state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The most recently generated plan, if any. Overwritten, never appended.
    last_plan: Option<String>,

    /// One-way latch: set the first time the follow-up panel is rendered
    followup_expanded: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a plan has been generated this session
    pub fn has_plan(&self) -> bool {
        self.last_plan.is_some()
    }

    /// The last generated plan (read-only input to follow-up questions)
    pub fn last_plan(&self) -> Option<&str> {
        self.last_plan.as_deref()
    }

    /// Overwrite the stored plan with a newly generated one
    ///
    /// Callers only invoke this on a successful generation; a failed call
    /// leaves the previous plan (if any) intact.
    pub fn set_plan(&mut self, plan: String) {
        debug!(plan_len = plan.len(), "SessionState::set_plan: called");
        self.last_plan = Some(plan);
    }

    /// Latch the follow-up panel open; stays open for the session
    pub fn mark_followup_rendered(&mut self) {
        if !self.followup_expanded {
            debug!("SessionState::mark_followup_rendered: latching open");
            self.followup_expanded = true;
        }
    }

    pub fn followup_expanded(&self) -> bool {
        self.followup_expanded
    }
}
