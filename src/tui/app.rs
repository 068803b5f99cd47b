//! TUI application state and key handling
//!
//! The App owns everything the views render: the form, the session state,
//! the busy indicator, and the status notice. Key handling mutates state and
//! may emit an [`Action`] for the runner to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::domain::{SessionState, TravelStyle, TripParameters};

use super::state::{Busy, BusyKind, FormField, Notice};

/// An action the runner should dispatch to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Generate a plan from the current parameters
    Generate,
    /// Ask a follow-up question against the last plan
    Ask,
}

/// TUI application state
pub struct App {
    /// Current trip parameters, edited through the form
    pub params: TripParameters,

    /// Session state (last plan, follow-up latch)
    pub session: SessionState,

    /// Follow-up question text
    pub question: String,

    /// Last follow-up answer, if any (display only, never persisted)
    pub answer: Option<String>,

    /// Which form field has focus
    pub focus: FormField,

    /// Cursor within the styles multi-select
    pub style_cursor: usize,

    /// Plan pane scroll offset
    pub plan_scroll: u16,

    /// In-flight agent call, if any
    pub busy: Option<Busy>,

    /// Inline warning or error line
    pub notice: Option<Notice>,

    /// Set when the user asks to quit
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        debug!("App::new: called");
        Self {
            params: TripParameters::new(),
            session: SessionState::new(),
            question: String::new(),
            answer: None,
            focus: FormField::default(),
            style_cursor: 0,
            plan_scroll: 0,
            busy: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Whether an agent call is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Mark an agent call as started
    pub fn begin_busy(&mut self, kind: BusyKind) {
        debug!(?kind, "App::begin_busy: called");
        self.notice = None;
        self.busy = Some(Busy::start(kind));
    }

    /// Mark the in-flight agent call as finished
    pub fn end_busy(&mut self) {
        debug!("App::end_busy: called");
        self.busy = None;
    }

    /// Handle a key event; may emit an action for the runner
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Action> {
        debug!(?key.code, "App::on_key: called");

        // Quit always works, even mid-call (the task is detached)
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            debug!("App::on_key: quit requested");
            self.should_quit = true;
            return None;
        }

        // The interaction surface is blocked while the agent works
        if self.is_busy() {
            debug!("App::on_key: busy, ignoring key");
            return None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter => {
                if self.focus == FormField::Question {
                    debug!("App::on_key: ask action");
                    Some(Action::Ask)
                } else {
                    debug!("App::on_key: generate action");
                    Some(Action::Generate)
                }
            }
            KeyCode::PageUp => {
                self.plan_scroll = self.plan_scroll.saturating_sub(5);
                None
            }
            KeyCode::PageDown => {
                self.plan_scroll = self.plan_scroll.saturating_add(5);
                None
            }
            _ => self.on_field_key(key),
        }
    }

    /// Field-specific key handling
    fn on_field_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.focus {
            FormField::Destination => match key.code {
                KeyCode::Char(c) => {
                    self.params.destination.push(c);
                    None
                }
                KeyCode::Backspace => {
                    self.params.destination.pop();
                    None
                }
                _ => None,
            },
            FormField::Duration => match key.code {
                KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => {
                    self.params.increment_duration();
                    None
                }
                KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => {
                    self.params.decrement_duration();
                    None
                }
                _ => None,
            },
            FormField::Budget => match key.code {
                KeyCode::Right | KeyCode::Char('l') => {
                    self.params.budget = self.params.budget.next();
                    None
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.params.budget = self.params.budget.prev();
                    None
                }
                _ => None,
            },
            FormField::Styles => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.style_cursor = self.style_cursor.saturating_sub(1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.style_cursor = (self.style_cursor + 1).min(TravelStyle::ALL.len() - 1);
                    None
                }
                KeyCode::Char(' ') => {
                    let style = TravelStyle::ALL[self.style_cursor];
                    self.params.toggle_style(style);
                    None
                }
                _ => None,
            },
            FormField::Question => match key.code {
                KeyCode::Char(c) => {
                    self.question.push(c);
                    None
                }
                KeyCode::Backspace => {
                    self.question.pop();
                    None
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BudgetTier;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_destination() {
        let mut app = App::new();
        for c in "Kyoto".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.params.destination, "Kyoto");

        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.params.destination, "Kyot");
    }

    #[test]
    fn test_duration_spinner_keys() {
        let mut app = App::new();
        app.focus = FormField::Duration;

        app.on_key(key(KeyCode::Up));
        assert_eq!(app.params.duration_days(), 6);

        app.on_key(key(KeyCode::Char('-')));
        app.on_key(key(KeyCode::Char('-')));
        assert_eq!(app.params.duration_days(), 4);
    }

    #[test]
    fn test_budget_cycle_keys() {
        let mut app = App::new();
        app.focus = FormField::Budget;

        app.on_key(key(KeyCode::Right));
        assert_eq!(app.params.budget, BudgetTier::Luxury);
        app.on_key(key(KeyCode::Right));
        assert_eq!(app.params.budget, BudgetTier::Luxury);
        app.on_key(key(KeyCode::Left));
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.params.budget, BudgetTier::Budget);
    }

    #[test]
    fn test_style_toggle_keys() {
        let mut app = App::new();
        app.focus = FormField::Styles;

        // Cursor starts on Culture; toggle it off
        app.on_key(key(KeyCode::Char(' ')));
        assert!(!app.params.has_style(TravelStyle::Culture));

        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Char(' ')));
        assert!(app.params.has_style(TravelStyle::Adventure));
    }

    #[test]
    fn test_enter_emits_actions_by_focus() {
        let mut app = App::new();
        assert_eq!(app.on_key(key(KeyCode::Enter)), Some(Action::Generate));

        app.focus = FormField::Question;
        assert_eq!(app.on_key(key(KeyCode::Enter)), Some(Action::Ask));
    }

    #[test]
    fn test_busy_blocks_input_but_not_quit() {
        let mut app = App::new();
        app.begin_busy(BusyKind::Generating);

        assert_eq!(app.on_key(key(KeyCode::Enter)), None);
        app.on_key(key(KeyCode::Char('x')));
        assert!(app.params.destination.is_empty());

        app.on_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_begin_busy_clears_notice() {
        let mut app = App::new();
        app.notice = Some(Notice::Warning("old".to_string()));
        app.begin_busy(BusyKind::Answering);
        assert!(app.notice.is_none());
        assert!(app.is_busy());

        app.end_busy();
        assert!(!app.is_busy());
    }
}
