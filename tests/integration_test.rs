//! Integration tests for TripPlan
//!
//! These tests drive the dispatcher end-to-end with a scripted LLM client and
//! verify how results and failures land in session state.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use tripplan::config::Config;
use tripplan::domain::{SessionState, TravelStyle, TripParameters};
use tripplan::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use tripplan::planner::{self, PlanDispatcher, PlannerError, UserInputError};
use tripplan::{Agent, normalize};

/// Scripted LLM client: returns canned responses in order, counts calls
struct ScriptedClient {
    responses: Mutex<Vec<CompletionResponse>>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::ApiError {
                status: 503,
                message: "scripted client exhausted".to_string(),
            });
        }
        Ok(responses.remove(0))
    }
}

fn dispatcher_with(responses: Vec<CompletionResponse>) -> (PlanDispatcher, Arc<ScriptedClient>) {
    let client = Arc::new(ScriptedClient::new(responses));
    let agent = Agent::new(
        client.clone(),
        vec![],
        planner::SYSTEM_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
        4096,
    );
    (PlanDispatcher::new(agent), client)
}

fn kyoto_params() -> TripParameters {
    let mut params = TripParameters::new();
    params.destination = "Kyoto".to_string();
    params.set_duration(3);
    params.set_styles(&[TravelStyle::Food, TravelStyle::Culture]);
    params
}

// =============================================================================
// Plan generation
// =============================================================================

#[tokio::test]
async fn test_generate_plan_stores_normalized_plan_in_session() {
    let (dispatcher, client) =
        dispatcher_with(vec![CompletionResponse::text("# Kyoto\n\n\n\nDay 1 \u{2223} Arrive")]);
    let mut session = SessionState::new();

    let plan = dispatcher.generate_plan(&kyoto_params()).await.unwrap();
    session.set_plan(plan);

    assert_eq!(session.last_plan(), Some("# Kyoto\n\nDay 1 | Arrive"));
    assert_eq!(client.call_count(), 1);

    // The prompt carried the form values
    let prompt = client.requests()[0].messages[0].content.as_text().unwrap().to_string();
    assert!(prompt.contains("Kyoto"));
    assert!(prompt.contains("3 days"));
    assert!(prompt.contains("Culture, Food"));
}

#[tokio::test]
async fn test_regenerating_overwrites_previous_plan() {
    let (dispatcher, _client) = dispatcher_with(vec![
        CompletionResponse::text("First plan"),
        CompletionResponse::text("Second plan"),
    ]);
    let mut session = SessionState::new();

    let plan = dispatcher.generate_plan(&kyoto_params()).await.unwrap();
    session.set_plan(plan);

    let mut params = kyoto_params();
    params.destination = "Lisbon".to_string();
    let plan = dispatcher.generate_plan(&params).await.unwrap();
    session.set_plan(plan);

    assert_eq!(session.last_plan(), Some("Second plan"));
}

#[tokio::test]
async fn test_failed_generation_leaves_session_unchanged() {
    // One good response, then the client errors
    let (dispatcher, client) = dispatcher_with(vec![CompletionResponse::text("The good plan")]);
    let mut session = SessionState::new();

    let plan = dispatcher.generate_plan(&kyoto_params()).await.unwrap();
    session.set_plan(plan);

    let err = dispatcher.generate_plan(&kyoto_params()).await.unwrap_err();
    assert!(matches!(err, PlannerError::Agent(_)));
    assert!(!err.is_user_input());

    // The earlier plan survives the failed regeneration
    assert_eq!(session.last_plan(), Some("The good plan"));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_missing_destination_never_reaches_the_client() {
    let (dispatcher, client) = dispatcher_with(vec![CompletionResponse::text("unused")]);
    let session = SessionState::new();

    let mut params = kyoto_params();
    params.destination = String::new();

    let err = dispatcher.generate_plan(&params).await.unwrap_err();
    assert!(matches!(
        err,
        PlannerError::UserInput(UserInputError::MissingDestination)
    ));
    assert_eq!(err.to_string(), "Please enter a destination first.");
    assert_eq!(client.call_count(), 0);
    assert!(!session.has_plan());
}

// =============================================================================
// Follow-up questions
// =============================================================================

#[tokio::test]
async fn test_followup_flow_against_stored_plan() {
    let (dispatcher, client) = dispatcher_with(vec![
        CompletionResponse::text("## Plan\nVisit the shrines."),
        CompletionResponse::text("They open at dawn."),
    ]);
    let mut session = SessionState::new();

    let plan = dispatcher.generate_plan(&kyoto_params()).await.unwrap();
    session.set_plan(plan);
    session.mark_followup_rendered();

    let answer = dispatcher
        .answer_followup("When do the shrines open?", session.last_plan().unwrap_or(""))
        .await
        .unwrap();
    assert_eq!(answer, "They open at dawn.");

    // The follow-up prompt embedded the stored plan and the question
    let prompt = client.requests()[1].messages[0].content.as_text().unwrap().to_string();
    assert!(prompt.contains("Visit the shrines."));
    assert!(prompt.contains("When do the shrines open?"));

    // Answers are never written back into the session
    assert_eq!(session.last_plan(), Some("## Plan\nVisit the shrines."));
}

#[tokio::test]
async fn test_followup_gates_make_no_client_calls() {
    let (dispatcher, client) = dispatcher_with(vec![CompletionResponse::text("unused")]);
    let session = SessionState::new();

    // No plan yet: even with a question typed, the plan gate fires first
    let err = dispatcher
        .answer_followup("Anything good nearby?", session.last_plan().unwrap_or(""))
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::UserInput(UserInputError::NoPlanYet)));
    assert_eq!(err.to_string(), "Generate your travel plan first.");

    // Plan present, question blank
    let err = dispatcher.answer_followup("   ", "a plan").await.unwrap_err();
    assert!(matches!(err, PlannerError::UserInput(UserInputError::MissingQuestion)));
    assert_eq!(err.to_string(), "Please ask a question.");

    assert_eq!(client.call_count(), 0);
}

// =============================================================================
// Session state
// =============================================================================

#[test]
fn test_followup_latch_is_one_way() {
    let mut session = SessionState::new();
    assert!(!session.followup_expanded());

    session.mark_followup_rendered();
    assert!(session.followup_expanded());

    // A new plan, or anything else, never resets the latch
    session.set_plan("another plan".to_string());
    session.mark_followup_rendered();
    assert!(session.followup_expanded());
}

#[test]
fn test_normalize_is_idempotent_on_model_output() {
    let raw = "Costs\u{2223}listed below\n\n\n\n\nEnjoy";
    let once = normalize(raw);
    assert_eq!(once, "Costs|listed below\n\nEnjoy");
    assert_eq!(normalize(&once), once);
}

// =============================================================================
// Wiring
// =============================================================================

#[test]
fn test_build_dispatcher_requires_search_key() {
    let mut config = Config::default();
    config.llm.api_key_env = "TRIPPLAN_ITEST_MISSING_LLM_KEY".to_string();
    config.search.api_key_env = "TRIPPLAN_ITEST_MISSING_SEARCH_KEY".to_string();

    // Without the API keys the dispatcher cannot be built
    assert!(planner::build_dispatcher(&config).is_err());
}
