use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Outbound: lead submission ──────────────────────────────────────────────

/// Operator-submitted record describing a sales prospect.
///
/// Created fresh on every submission and never mutated; it is owned by the
/// single gateway call that carries it and dropped once the response arrives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    pub lead_id: String,
    pub company: String,
    pub contact_name: String,
    pub role: String,
    pub painpoints: String,
    pub notes: String,
}

// ─── Inbound: suggestion bundle ─────────────────────────────────────────────

/// Server-computed recommendation bundle returned for a lead.
///
/// The client treats it as immutable and resubmits it verbatim on approval.
/// Fields the server attaches beyond the known shape (`id`, `created_at`, …)
/// are preserved through the flattened `extra` map so the approval payload
/// round-trips the exact field set we received. Every known leaf defaults to
/// empty when absent; a sparse suggestion renders as blanks, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    #[serde(default)]
    pub context: SuggestionContext,
    #[serde(default)]
    pub plan: ActionPlan,
    #[serde(default)]
    pub similar: Vec<SimilarCase>,
    #[serde(default)]
    pub draft: EmailDraft,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuggestionContext {
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub priority: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionPlan {
    #[serde(default)]
    pub recommended_action: String,
    #[serde(default)]
    pub eta: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One scored past deal, displayed in the order the server ranked them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarCase {
    #[serde(default)]
    pub deal_id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub outcome: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The editable subject/body pair proposed as outreach email content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailDraft {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

// ─── Outbound: approval ─────────────────────────────────────────────────────

/// Approval payload: the live suggestion, unmodified, plus the draft text
/// currently in the edit surface. `edited_subject` rides along only when the
/// `approval.submit_edited_subject` config switch is on; the original wire
/// contract carries the body alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub suggestion: Suggestion,
    pub edited_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_subject: Option<String>,
}

// ─── Response envelopes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResponse {
    pub suggestion: Suggestion,
    #[serde(default)]
    pub analytics: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApproveResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub audit: Value,
    #[serde(default)]
    pub analytics: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditResponse {
    #[serde(default)]
    pub audit: Value,
}
