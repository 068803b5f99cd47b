//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Rendering at ~30 FPS
//! - Dispatching events to App for handling
//! - Spawning plan/follow-up agent calls as background tasks
//! - Applying task outcomes to session state

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::planner::{PlanDispatcher, PlannerError};

use super::Tui;
use super::app::{Action, App};
use super::events::{Event, EventHandler};
use super::state::{BusyKind, Notice};
use super::views;

/// A failed dispatch, already flattened to a display message
#[derive(Debug)]
struct TaskFailure {
    /// User-fixable input problem (warning) vs service error
    user_input: bool,
    message: String,
}

impl From<PlannerError> for TaskFailure {
    fn from(err: PlannerError) -> Self {
        Self {
            user_input: err.is_user_input(),
            message: err.to_string(),
        }
    }
}

/// Result from a background agent call
#[derive(Debug)]
enum TaskOutcome {
    /// A plan generation finished
    Plan(Result<String, TaskFailure>),
    /// A follow-up answer finished
    Answer(Result<String, TaskFailure>),
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Dispatcher shared with background tasks
    dispatcher: Arc<PlanDispatcher>,
    /// Outcome channel from background tasks
    outcome_tx: mpsc::Sender<TaskOutcome>,
    outcome_rx: mpsc::Receiver<TaskOutcome>,
    /// Running agent task, if any
    task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, dispatcher: PlanDispatcher) -> Self {
        debug!("TuiRunner::new: called");
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        Self {
            app: App::new(),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            dispatcher: Arc::new(dispatcher),
            outcome_tx,
            outcome_rx,
            task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        info!("TuiRunner::run: starting main loop");
        loop {
            // Apply any finished background task before drawing
            while let Ok(outcome) = self.outcome_rx.try_recv() {
                self.apply_outcome(outcome);
            }

            // Draw the UI
            let app = &mut self.app;
            self.terminal.draw(|frame| views::render(app, frame))?;

            // The follow-up panel is on screen from the first frame after a
            // plan lands, and stays for the rest of the session
            if self.app.session.has_plan() {
                self.app.session.mark_followup_rendered();
            }

            // Handle events
            match self.event_handler.next().await? {
                Event::Tick => {}
                Event::Resize(_, _) => {}
                Event::Key(key_event) => {
                    if let Some(action) = self.app.on_key(key_event) {
                        self.dispatch(action);
                    }
                }
            }

            if self.app.should_quit {
                info!("TuiRunner::run: quit requested");
                break;
            }
        }

        // Abort any in-flight call so the process can exit promptly
        if let Some(task) = self.task.take() {
            debug!("TuiRunner::run: aborting in-flight task");
            task.abort();
        }

        Ok(())
    }

    /// Spawn the agent call for an action
    fn dispatch(&mut self, action: Action) {
        debug!(?action, "TuiRunner::dispatch: called");
        let dispatcher = self.dispatcher.clone();
        let tx = self.outcome_tx.clone();

        match action {
            Action::Generate => {
                self.app.begin_busy(BusyKind::Generating);
                let params = self.app.params.clone();
                self.task = Some(tokio::spawn(async move {
                    let result = dispatcher.generate_plan(&params).await;
                    let _ = tx.send(TaskOutcome::Plan(result.map_err(Into::into))).await;
                }));
            }
            Action::Ask => {
                self.app.begin_busy(BusyKind::Answering);
                let question = self.app.question.clone();
                let plan = self.app.session.last_plan().unwrap_or("").to_string();
                self.task = Some(tokio::spawn(async move {
                    let result = dispatcher.answer_followup(&question, &plan).await;
                    let _ = tx.send(TaskOutcome::Answer(result.map_err(Into::into))).await;
                }));
            }
        }
    }

    /// Apply a finished background task to app and session state
    fn apply_outcome(&mut self, outcome: TaskOutcome) {
        debug!("TuiRunner::apply_outcome: called");
        self.app.end_busy();
        self.task = None;

        match outcome {
            TaskOutcome::Plan(Ok(plan)) => {
                info!(plan_len = plan.len(), "TuiRunner::apply_outcome: plan stored");
                self.app.session.set_plan(plan);
                self.app.plan_scroll = 0;
                self.app.answer = None;
            }
            TaskOutcome::Answer(Ok(answer)) => {
                info!(answer_len = answer.len(), "TuiRunner::apply_outcome: answer shown");
                self.app.answer = Some(answer);
                self.app.question.clear();
            }
            TaskOutcome::Plan(Err(failure)) | TaskOutcome::Answer(Err(failure)) => {
                // Session state is untouched on failure; a previous plan survives
                warn!(message = %failure.message, "TuiRunner::apply_outcome: task failed");
                self.app.notice = Some(if failure.user_input {
                    Notice::Warning(failure.message)
                } else {
                    Notice::Error(format!("Application error: {}", failure.message))
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_error_flattens_to_failure() {
        let err = PlannerError::UserInput(crate::planner::UserInputError::MissingDestination);
        let failure = TaskFailure::from(err);
        assert!(failure.user_input);
        assert_eq!(failure.message, "Please enter a destination first.");
    }
}
