//! TUI state enums and helpers
//!
//! Pure data structures for the TUI. No rendering logic here.

use std::time::Instant;

use rand::seq::IndexedRandom;
use tracing::debug;

/// Fun words for the busy spinner while the agent works
pub const SPINNER_WORDS: &[&str] = &[
    "Charting",
    "Scouting",
    "Packing",
    "Routing",
    "Mapping",
    "Wandering",
    "Researching",
    "Exploring",
    "Itinerizing",
    "Globetrotting",
];

/// Braille spinner frames
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Which form field currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Destination,
    Duration,
    Budget,
    Styles,
    Question,
}

impl FormField {
    /// Get the next field in the Tab cycle
    pub fn next(self) -> Self {
        debug!(?self, "FormField::next: called");
        match self {
            Self::Destination => Self::Duration,
            Self::Duration => Self::Budget,
            Self::Budget => Self::Styles,
            Self::Styles => Self::Question,
            Self::Question => Self::Destination,
        }
    }

    /// Get the previous field in the Tab cycle
    pub fn prev(self) -> Self {
        debug!(?self, "FormField::prev: called");
        match self {
            Self::Destination => Self::Question,
            Self::Duration => Self::Destination,
            Self::Budget => Self::Duration,
            Self::Styles => Self::Budget,
            Self::Question => Self::Styles,
        }
    }

    /// Label shown next to the field
    pub fn label(self) -> &'static str {
        match self {
            Self::Destination => "Destination",
            Self::Duration => "Duration",
            Self::Budget => "Budget",
            Self::Styles => "Travel Styles",
            Self::Question => "Your question",
        }
    }
}

/// Which agent call is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyKind {
    Generating,
    Answering,
}

/// A running agent call, for the spinner
#[derive(Debug, Clone)]
pub struct Busy {
    pub kind: BusyKind,
    pub word: &'static str,
    pub started: Instant,
}

impl Busy {
    /// Start a busy indicator with a random spinner word
    pub fn start(kind: BusyKind) -> Self {
        debug!(?kind, "Busy::start: called");
        let word = SPINNER_WORDS.choose(&mut rand::rng()).copied().unwrap_or("Working");
        Self {
            kind,
            word,
            started: Instant::now(),
        }
    }

    /// Current spinner frame based on elapsed time
    pub fn frame(&self) -> &'static str {
        let idx = (self.started.elapsed().as_millis() / 100) as usize % SPINNER_FRAMES.len();
        SPINNER_FRAMES[idx]
    }
}

/// Inline status line: user-fixable warning or service error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field_cycle_round_trips() {
        let mut field = FormField::Destination;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, FormField::Destination);

        assert_eq!(FormField::Destination.prev(), FormField::Question);
        assert_eq!(FormField::Question.next(), FormField::Destination);
    }

    #[test]
    fn test_busy_has_word_and_frame() {
        let busy = Busy::start(BusyKind::Generating);
        assert!(SPINNER_WORDS.contains(&busy.word));
        assert!(SPINNER_FRAMES.contains(&busy.frame()));
    }
}
