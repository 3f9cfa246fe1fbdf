//! Explicit view-region state.
//!
//! Each output region is a single-writer cell holding the latest rendered
//! value: setters are crate-private so only the session orchestrator writes,
//! while frontends and tests read. Replacement is always wholesale.

use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Region {
    content: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Region {
    fn replace(&mut self, content: String) {
        self.content = Some(content);
        self.refreshed_at = Some(Utc::now());
    }

    fn clear(&mut self) {
        self.content = None;
        self.refreshed_at = None;
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    suggestion: Region,
    analytics: Region,
    audit: Region,
    error: Region,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Writers (session orchestrator only) ─────────────────────────────

    pub(crate) fn set_suggestion(&mut self, card: String) {
        self.suggestion.replace(card);
    }

    pub(crate) fn set_analytics(&mut self, analytics: &Value) {
        self.analytics.replace(pretty(analytics));
    }

    pub(crate) fn set_audit(&mut self, audit: &Value) {
        self.audit.replace(pretty(audit));
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error.replace(message);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error.clear();
    }

    // ── Readers ─────────────────────────────────────────────────────────

    pub fn suggestion(&self) -> &Region {
        &self.suggestion
    }

    pub fn analytics(&self) -> &Region {
        &self.analytics
    }

    pub fn audit(&self) -> &Region {
        &self.audit
    }

    pub fn error(&self) -> &Region {
        &self.error
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
