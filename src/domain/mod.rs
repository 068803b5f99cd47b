//! Domain types: trip parameters and session state

mod session;
mod trip;

pub use session::SessionState;
pub use trip::{BudgetTier, MAX_DURATION_DAYS, MIN_DURATION_DAYS, TravelStyle, TripParameters};
