//! Session orchestrator: wires lead intake, the suggestion round trip, the
//! editable draft, approval, and the analytics/audit refreshes together.
//!
//! The orchestrator is the single writer of the [`ViewState`] regions and
//! the sole owner of the live suggestion. At most one suggestion is live at
//! a time; rendering a new one unconditionally supersedes the old, including
//! any approval still in flight against it (see [`ApprovalTicket`]).

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::config::{ApprovalConfig, Config, LeadDefaults, StaleResponsePolicy};
use crate::error::{Result, SessionError};
use crate::lead::{self, LeadForm};
use crate::model::{ApprovalRequest, ApproveResponse, Suggestion};
use crate::view::{EditableDraft, ViewState, card};

/// Progression per submission. `submit` is accepted in every phase: a new
/// lead simply supersedes whatever is on screen, there is no lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Submitting,
    SuggestionShown,
    Approving,
    Completed,
}

/// An approval captured at request time: the suggestion that was live, the
/// draft text as currently edited, and the generation it belongs to. The
/// generation lets a late response be recognized as stale after the view
/// has moved on.
#[derive(Debug, Clone)]
pub struct ApprovalTicket {
    request: ApprovalRequest,
    generation: u64,
}

impl ApprovalTicket {
    pub fn request(&self) -> &ApprovalRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The response was applied to the view.
    Applied,
    /// The response arrived after its suggestion was superseded and the
    /// stale policy says to drop it.
    Stale,
}

struct LiveSuggestion {
    suggestion: Suggestion,
    draft: EditableDraft,
}

pub struct Session {
    api: ApiClient,
    view: ViewState,
    defaults: LeadDefaults,
    approval: ApprovalConfig,
    live: Option<LiveSuggestion>,
    generation: u64,
    phase: SessionPhase,
    session_id: Uuid,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            api: ApiClient::new(&config.service),
            view: ViewState::new(),
            defaults: config.lead_defaults.clone(),
            approval: config.approval.clone(),
            live: None,
            generation: 0,
            phase: SessionPhase::Idle,
            session_id: Uuid::new_v4(),
        }
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// Build a lead from the form, post it, and render the returned
    /// suggestion. On failure the placeholder is replaced by an error card
    /// and the phase rolls back so the operator can submit again.
    pub async fn submit(&mut self, form: LeadForm) -> Result<()> {
        let lead = lead::build_lead(&form, &self.defaults);
        info!(
            session = %self.session_id,
            lead_id = %lead.lead_id,
            company = %lead.company,
            "submitting lead"
        );
        self.phase = SessionPhase::Submitting;
        self.view.set_suggestion(card::processing());

        match self.api.submit_lead(&lead).await {
            Ok(response) => {
                self.show_suggestion(response.suggestion, &response.analytics);
                info!(generation = self.generation, "suggestion rendered");
                Ok(())
            }
            Err(err) => {
                self.view
                    .set_suggestion(card::error("lead submission", &err.to_string()));
                self.view.set_error(err.to_string());
                self.phase = SessionPhase::Idle;
                Err(err.into())
            }
        }
    }

    /// Render a suggestion as the live one, superseding any predecessor.
    /// The draft cells are reseeded; the old approval control is gone with
    /// the old generation.
    fn show_suggestion(&mut self, suggestion: Suggestion, analytics: &Value) {
        self.generation += 1;
        let draft = EditableDraft::seed(&suggestion.draft);
        self.view.set_suggestion(card::suggestion(&suggestion));
        self.view.set_analytics(analytics);
        self.view.clear_error();
        self.live = Some(LiveSuggestion { suggestion, draft });
        self.phase = SessionPhase::SuggestionShown;
    }

    // ── Approval ────────────────────────────────────────────────────────

    /// Capture the live suggestion and the draft text as currently edited.
    /// Always reads the cells, never the original server draft, so an
    /// edit-then-approve submits what the operator sees.
    pub fn approval_request(&mut self) -> Result<ApprovalTicket> {
        let live = self.live.as_ref().ok_or(SessionError::NoLiveSuggestion)?;
        let request = ApprovalRequest {
            suggestion: live.suggestion.clone(),
            edited_body: live.draft.body().to_string(),
            edited_subject: if self.approval.submit_edited_subject {
                Some(live.draft.subject().to_string())
            } else {
                None
            },
        };
        self.phase = SessionPhase::Approving;
        info!(generation = self.generation, "approval requested");
        Ok(ApprovalTicket {
            request,
            generation: self.generation,
        })
    }

    /// Post the approval and apply the result, then refresh the audit panel
    /// with a standalone fetch.
    pub async fn approve(&mut self) -> Result<ApprovalOutcome> {
        let ticket = self.approval_request()?;
        match self.api.approve(ticket.request()).await {
            Ok(response) => {
                let outcome = self.apply_approval(&ticket, response);
                if outcome == ApprovalOutcome::Applied {
                    if let Err(err) = self.refresh_audit().await {
                        warn!(error = %err, "audit refresh after approval failed");
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                self.view.set_error(format!("approval: {err}"));
                self.phase = SessionPhase::SuggestionShown;
                Err(err.into())
            }
        }
    }

    /// Apply an approval response under the configured stale policy. A
    /// response whose ticket generation no longer matches the live
    /// generation is stale: `discard` drops it, `overwrite` applies it
    /// anyway (the original demo's accidental behavior).
    pub fn apply_approval(
        &mut self,
        ticket: &ApprovalTicket,
        response: ApproveResponse,
    ) -> ApprovalOutcome {
        let stale = ticket.generation != self.generation;
        if stale {
            if self.approval.stale_responses == StaleResponsePolicy::Discard {
                warn!(
                    ticket_generation = ticket.generation,
                    live_generation = self.generation,
                    "discarding stale approval response"
                );
                return ApprovalOutcome::Stale;
            }
            warn!(
                ticket_generation = ticket.generation,
                live_generation = self.generation,
                "stale approval response overwrites the current view"
            );
        }
        self.view
            .set_suggestion(card::execution_result(&response.audit));
        self.view.set_analytics(&response.analytics);
        self.view.clear_error();
        self.live = None;
        self.phase = SessionPhase::Completed;
        info!(status = %response.status, "approval applied");
        ApprovalOutcome::Applied
    }

    // ── Panel refreshes ─────────────────────────────────────────────────

    pub async fn refresh_audit(&mut self) -> Result<()> {
        match self.api.fetch_audit().await {
            Ok(response) => {
                self.view.set_audit(&response.audit);
                Ok(())
            }
            Err(err) => {
                self.view.set_error(format!("audit refresh: {err}"));
                Err(err.into())
            }
        }
    }

    pub async fn refresh_analytics(&mut self) -> Result<()> {
        match self.api.fetch_analytics().await {
            Ok(analytics) => {
                self.view.set_analytics(&analytics);
                Ok(())
            }
            Err(err) => {
                self.view.set_error(format!("analytics refresh: {err}"));
                Err(err.into())
            }
        }
    }

    // ── Readers ─────────────────────────────────────────────────────────

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn defaults(&self) -> &LeadDefaults {
        &self.defaults
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.live.as_ref().map(|live| &live.suggestion)
    }

    pub fn draft(&self) -> Option<&EditableDraft> {
        self.live.as_ref().map(|live| &live.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditableDraft> {
        self.live.as_mut().map(|live| &mut live.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmailDraft, SuggestionContext};
    use serde_json::json;

    fn session_with(approval: ApprovalConfig) -> Session {
        let config = Config {
            approval,
            ..Config::default()
        };
        Session::new(&config)
    }

    fn suggestion(contact: &str, body: &str) -> Suggestion {
        Suggestion {
            context: SuggestionContext {
                contact_name: contact.into(),
                company: "Acme Cloud".into(),
                priority: "High".into(),
                ..SuggestionContext::default()
            },
            draft: EmailDraft {
                subject: "Re: Acme Cloud".into(),
                body: body.into(),
            },
            ..Suggestion::default()
        }
    }

    fn approve_response() -> ApproveResponse {
        ApproveResponse {
            status: "ok".into(),
            audit: json!({"event": "approved_and_executed"}),
            analytics: json!({"auto_actions": 1}),
        }
    }

    #[test]
    fn phases_display_in_snake_case() {
        assert_eq!(SessionPhase::SuggestionShown.to_string(), "suggestion_shown");
        assert_eq!(SessionPhase::Idle.to_string(), "idle");
    }

    #[test]
    fn approval_without_live_suggestion_is_an_error() {
        let mut session = session_with(ApprovalConfig::default());
        let err = session.approval_request().unwrap_err();
        assert!(err.to_string().contains("no live suggestion"));
    }

    #[test]
    fn approval_sends_the_currently_displayed_body() {
        let mut session = session_with(ApprovalConfig::default());
        session.show_suggestion(suggestion("Jane Doe", "Hi"), &json!({}));
        session.draft_mut().unwrap().set_body("Hi there".into());

        let ticket = session.approval_request().unwrap();
        assert_eq!(ticket.request().edited_body, "Hi there");
        assert_eq!(
            ticket.request().suggestion.draft.body,
            "Hi",
            "the suggestion itself rides along unmodified"
        );
    }

    #[test]
    fn edited_subject_is_omitted_by_default() {
        let mut session = session_with(ApprovalConfig::default());
        session.show_suggestion(suggestion("Jane Doe", "Hi"), &json!({}));
        session.draft_mut().unwrap().set_subject("New subject".into());

        let ticket = session.approval_request().unwrap();
        assert!(ticket.request().edited_subject.is_none());
    }

    #[test]
    fn edited_subject_is_submitted_when_configured() {
        let mut session = session_with(ApprovalConfig {
            submit_edited_subject: true,
            ..ApprovalConfig::default()
        });
        session.show_suggestion(suggestion("Jane Doe", "Hi"), &json!({}));
        session.draft_mut().unwrap().set_subject("New subject".into());

        let ticket = session.approval_request().unwrap();
        assert_eq!(ticket.request().edited_subject.as_deref(), Some("New subject"));
    }

    #[test]
    fn fresh_approval_response_applies() {
        let mut session = session_with(ApprovalConfig::default());
        session.show_suggestion(suggestion("Jane Doe", "Hi"), &json!({}));
        let ticket = session.approval_request().unwrap();

        let outcome = session.apply_approval(&ticket, approve_response());
        assert_eq!(outcome, ApprovalOutcome::Applied);
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert!(session.suggestion().is_none());
        let shown = session.view().suggestion().content().unwrap();
        assert!(shown.contains("Execution Result"));
        assert!(session.view().analytics().content().unwrap().contains("auto_actions"));
    }

    #[test]
    fn resubmission_supersedes_the_live_suggestion() {
        let mut session = session_with(ApprovalConfig::default());
        session.show_suggestion(suggestion("Jane Doe", "Hi Jane"), &json!({}));
        assert_eq!(session.generation(), 1);

        session.show_suggestion(suggestion("Sam Lee", "Hi Sam"), &json!({}));
        assert_eq!(session.generation(), 2);
        let shown = session.view().suggestion().content().unwrap();
        assert!(shown.contains("Sam Lee"));
        assert!(!shown.contains("Jane Doe"), "old card must be gone, not hidden");
        assert_eq!(session.draft().unwrap().body(), "Hi Sam", "draft reseeded");
    }

    #[test]
    fn stale_approval_response_is_discarded_by_default() {
        let mut session = session_with(ApprovalConfig::default());
        session.show_suggestion(suggestion("Jane Doe", "Hi Jane"), &json!({}));
        let ticket = session.approval_request().unwrap();

        // A new submission lands before the approval response does.
        session.show_suggestion(suggestion("Sam Lee", "Hi Sam"), &json!({}));

        let outcome = session.apply_approval(&ticket, approve_response());
        assert_eq!(outcome, ApprovalOutcome::Stale);
        assert_eq!(session.phase(), SessionPhase::SuggestionShown);
        let shown = session.view().suggestion().content().unwrap();
        assert!(shown.contains("Sam Lee"), "current view stays untouched");
        assert!(!shown.contains("Execution Result"));
    }

    #[test]
    fn refresh_failure_sets_the_error_region() {
        let config = Config {
            service: crate::config::ServiceConfig {
                // Port 1 is essentially guaranteed closed.
                base_url: "http://127.0.0.1:1".into(),
                ..crate::config::ServiceConfig::default()
            },
            ..Config::default()
        };
        let mut session = Session::new(&config);

        let result = tokio_test::block_on(session.refresh_analytics());
        assert!(result.is_err());
        let message = session.view().error().content().unwrap();
        assert!(message.contains("analytics refresh"));
        assert!(session.view().analytics().is_empty(), "no partial panel update");
    }

    #[test]
    fn overwrite_policy_applies_stale_responses() {
        let mut session = session_with(ApprovalConfig {
            stale_responses: StaleResponsePolicy::Overwrite,
            ..ApprovalConfig::default()
        });
        session.show_suggestion(suggestion("Jane Doe", "Hi Jane"), &json!({}));
        let ticket = session.approval_request().unwrap();
        session.show_suggestion(suggestion("Sam Lee", "Hi Sam"), &json!({}));

        let outcome = session.apply_approval(&ticket, approve_response());
        assert_eq!(outcome, ApprovalOutcome::Applied);
        let shown = session.view().suggestion().content().unwrap();
        assert!(shown.contains("Execution Result"));
    }
}
