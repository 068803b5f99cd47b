//! Prompt templates for plan generation and follow-up questions
//!
//! Templates are Handlebars, embedded in the binary. Triple-stash
//! substitution everywhere: prompts are plain text, not HTML, so nothing
//! gets entity-escaped.

use handlebars::{Handlebars, RenderError};
use serde::Serialize;
use tracing::debug;

use crate::domain::TripParameters;

/// Fixed instruction set for the travel agent
pub const SYSTEM_INSTRUCTIONS: [&str; 4] = [
    "You are a travel planning assistant.",
    "Help users plan their trips by researching destinations, finding attractions, suggesting accommodations, and providing transportation options.",
    "Give relevant live links for each place and hotel you recommend (this is essential).",
    "Always verify current information before making suggestions.",
];

/// The six sections every generated plan must contain, in order
pub const PLAN_SECTIONS: [&str; 6] = [
    "Best Time to Visit",
    "Accommodation",
    "Day-by-Day Itinerary",
    "Local Culinary Experiences",
    "Travel Tips",
    "Total Estimated Cost",
];

/// Plan generation prompt
const PLAN_TEMPLATE: &str = "\
Create a comprehensive travel plan for {{{destination}}} for {{{duration}}} days.

Travel Preferences:
- Budget Level: {{{budget}}}
- Travel Styles: {{{styles}}}

Please include:

1. Best Time to Visit
2. Accommodation (in {{{budget}}} range)
3. Day-by-Day Itinerary
4. Local Culinary Experiences
5. Travel Tips (transportation, etiquette, budget)
6. Total Estimated Cost

Provide all information in markdown format with proper sections and links.
";

/// Follow-up question prompt, carrying the prior plan verbatim
const FOLLOWUP_TEMPLATE: &str = "\
I have a travel plan. Here's the plan:

{{{plan}}}

Now, answer this question:
{{{question}}}
";

/// Context for the plan template
#[derive(Debug, Serialize)]
struct PlanContext {
    destination: String,
    duration: u32,
    budget: &'static str,
    styles: String,
}

/// Context for the follow-up template
#[derive(Debug, Serialize)]
struct FollowupContext<'a> {
    plan: &'a str,
    question: &'a str,
}

/// Render the plan generation prompt for the given parameters
pub fn render_plan_prompt(params: &TripParameters) -> Result<String, RenderError> {
    debug!(destination = %params.destination, duration = params.duration_days(), "render_plan_prompt: called");
    let ctx = PlanContext {
        destination: params.destination.clone(),
        duration: params.duration_days(),
        budget: params.budget.label(),
        styles: params.styles_label(),
    };

    Handlebars::new().render_template(PLAN_TEMPLATE, &ctx)
}

/// Render the follow-up prompt embedding the prior plan and the question
pub fn render_followup_prompt(question: &str, plan: &str) -> Result<String, RenderError> {
    debug!(question_len = question.len(), plan_len = plan.len(), "render_followup_prompt: called");
    let ctx = FollowupContext { plan, question };

    Handlebars::new().render_template(FOLLOWUP_TEMPLATE, &ctx)
}
