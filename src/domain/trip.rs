//! Trip parameters - what the user wants from a trip

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum trip duration in days
pub const MIN_DURATION_DAYS: u32 = 1;

/// Maximum trip duration in days
pub const MAX_DURATION_DAYS: u32 = 30;

/// Budget tier for the trip (three ordered levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// All tiers in ascending order
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    /// Display label as shown in the form and embedded in prompts
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
        }
    }

    /// Next tier up (saturating at Luxury)
    pub fn next(self) -> Self {
        match self {
            BudgetTier::Budget => BudgetTier::Moderate,
            BudgetTier::Moderate => BudgetTier::Luxury,
            BudgetTier::Luxury => BudgetTier::Luxury,
        }
    }

    /// Next tier down (saturating at Budget)
    pub fn prev(self) -> Self {
        match self {
            BudgetTier::Budget => BudgetTier::Budget,
            BudgetTier::Moderate => BudgetTier::Budget,
            BudgetTier::Luxury => BudgetTier::Moderate,
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "budget" => Ok(BudgetTier::Budget),
            "moderate" => Ok(BudgetTier::Moderate),
            "luxury" => Ok(BudgetTier::Luxury),
            other => Err(format!("Unknown budget tier: '{}'. Expected budget, moderate, or luxury", other)),
        }
    }
}

/// Travel style tag (multi-select)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelStyle {
    Culture,
    Nature,
    Adventure,
    Relaxation,
    Food,
    Shopping,
}

impl TravelStyle {
    /// All selectable styles, in form order
    pub const ALL: [TravelStyle; 6] = [
        TravelStyle::Culture,
        TravelStyle::Nature,
        TravelStyle::Adventure,
        TravelStyle::Relaxation,
        TravelStyle::Food,
        TravelStyle::Shopping,
    ];

    /// Display label as shown in the form and embedded in prompts
    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::Culture => "Culture",
            TravelStyle::Nature => "Nature",
            TravelStyle::Adventure => "Adventure",
            TravelStyle::Relaxation => "Relaxation",
            TravelStyle::Food => "Food",
            TravelStyle::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "culture" => Ok(TravelStyle::Culture),
            "nature" => Ok(TravelStyle::Nature),
            "adventure" => Ok(TravelStyle::Adventure),
            "relaxation" => Ok(TravelStyle::Relaxation),
            "food" => Ok(TravelStyle::Food),
            "shopping" => Ok(TravelStyle::Shopping),
            other => Err(format!("Unknown travel style: '{}'", other)),
        }
    }
}

/// The user's trip parameters
///
/// Mutated freely during the session through the form; never persisted.
/// Styles keep form order and stay duplicate-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripParameters {
    pub destination: String,
    duration_days: u32,
    pub budget: BudgetTier,
    styles: Vec<TravelStyle>,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration_days: 5,
            budget: BudgetTier::default(),
            styles: vec![TravelStyle::Culture, TravelStyle::Nature],
        }
    }
}

impl TripParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip duration in days (always within 1..=30)
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Set the duration, clamping to the valid range
    ///
    /// Clamping lives here as well as in the TUI spinner, so batch mode gets
    /// the same 1-30 guarantee.
    pub fn set_duration(&mut self, days: u32) {
        debug!(days, "TripParameters::set_duration: called");
        self.duration_days = days.clamp(MIN_DURATION_DAYS, MAX_DURATION_DAYS);
    }

    /// Increment duration by one day (saturating at 30)
    pub fn increment_duration(&mut self) {
        self.set_duration(self.duration_days.saturating_add(1));
    }

    /// Decrement duration by one day (saturating at 1)
    pub fn decrement_duration(&mut self) {
        self.set_duration(self.duration_days.saturating_sub(1));
    }

    /// Selected styles, in form order
    pub fn styles(&self) -> &[TravelStyle] {
        &self.styles
    }

    /// Check whether a style is selected
    pub fn has_style(&self, style: TravelStyle) -> bool {
        self.styles.contains(&style)
    }

    /// Toggle a style on or off, keeping form order
    pub fn toggle_style(&mut self, style: TravelStyle) {
        debug!(?style, "TripParameters::toggle_style: called");
        if let Some(pos) = self.styles.iter().position(|s| *s == style) {
            self.styles.remove(pos);
        } else {
            self.styles.push(style);
            self.styles
                .sort_by_key(|s| TravelStyle::ALL.iter().position(|a| a == s).unwrap_or(usize::MAX));
        }
    }

    /// Replace the selection, deduplicated and in form order
    pub fn set_styles(&mut self, styles: &[TravelStyle]) {
        debug!(?styles, "TripParameters::set_styles: called");
        self.styles = TravelStyle::ALL
            .iter()
            .copied()
            .filter(|s| styles.contains(s))
            .collect();
    }

    /// Comma-joined style labels for prompts and the overview line
    pub fn styles_label(&self) -> String {
        if self.styles.is_empty() {
            return "N/A".to_string();
        }
        self.styles
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
