//! Card renderers for the suggestion view region.
//!
//! Cards are markup fragments; every piece of server-provided text passes
//! through [`markup::escape`] before interpolation. The console frontend
//! projects cards to styled text via [`crate::view::plain`].

use serde_json::Value;
use std::fmt::Write;

use crate::model::Suggestion;
use crate::view::markup::escape;

/// Interim placeholder shown while the lead submission is in flight.
pub fn processing() -> String {
    "<div class=\"card\">Processing…</div>".to_string()
}

/// The suggestion card: lead identity, priority, plan, rationale, ranked
/// similar cases in server order, then the editable draft fields pre-filled
/// from the server-provided draft.
pub fn suggestion(suggestion: &Suggestion) -> String {
    let context = &suggestion.context;
    let plan = &suggestion.plan;
    let mut card = String::from("<div class=\"card\">\n<h3>Suggestion</h3>\n");
    let _ = writeln!(
        card,
        "<p><strong>Lead:</strong> {} @ {}</p>",
        escape(&context.contact_name),
        escape(&context.company)
    );
    let _ = writeln!(
        card,
        "<p><strong>Priority:</strong> {}</p>",
        escape(&context.priority)
    );
    let _ = writeln!(
        card,
        "<p><strong>Plan:</strong> {} (ETA: {})</p>",
        escape(&plan.recommended_action),
        escape(&plan.eta)
    );
    let _ = writeln!(
        card,
        "<p><strong>Rationale:</strong> {}</p>",
        escape(&plan.rationale)
    );
    card.push_str("<h4>Similar past cases</h4>\n<ul>\n");
    for case in &suggestion.similar {
        let _ = writeln!(
            card,
            "<li>{} — {} [score: {}] — {}</li>",
            escape(&case.deal_id),
            escape(&case.company),
            case.score,
            escape(&case.outcome)
        );
    }
    card.push_str("</ul>\n<h4>Draft Email</h4>\n<label>Subject</label>\n");
    let _ = writeln!(
        card,
        "<input id=\"email_subject\" value=\"{}\"/>",
        escape(&suggestion.draft.subject)
    );
    card.push_str("<label>Body</label>\n");
    let _ = writeln!(
        card,
        "<textarea id=\"email_body\" rows=\"6\">{}</textarea>",
        escape(&suggestion.draft.body)
    );
    card.push_str("</div>");
    card
}

/// Terminal card shown after an approval is applied: the returned audit
/// structure verbatim, pretty-printed.
pub fn execution_result(audit: &Value) -> String {
    let pretty =
        serde_json::to_string_pretty(audit).unwrap_or_else(|_| audit.to_string());
    let mut card = String::from("<div class=\"card\">\n<h3>Execution Result</h3>\n");
    let _ = writeln!(card, "<pre>{}</pre>", escape(&pretty));
    card.push_str("<p class=\"muted\">Mock CRM/Calendar/Outbox updated (demo mode).</p>\n</div>");
    card
}

/// Failure card naming the stage that failed, so the operator is never left
/// staring at a stuck placeholder.
pub fn error(stage: &str, reason: &str) -> String {
    let mut card = String::from("<div class=\"card error\">\n<h3>Request Failed</h3>\n");
    let _ = writeln!(card, "<p><strong>Stage:</strong> {}</p>", escape(stage));
    let _ = writeln!(card, "<p>{}</p>", escape(reason));
    card.push_str("<p class=\"muted\">Check the service and submit again to retry.</p>\n</div>");
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionPlan, EmailDraft, SimilarCase, SuggestionContext};
    use serde_json::json;

    fn sample() -> Suggestion {
        Suggestion {
            context: SuggestionContext {
                contact_name: "Jane Doe".into(),
                company: "Acme Cloud".into(),
                priority: "High".into(),
                ..SuggestionContext::default()
            },
            plan: ActionPlan {
                recommended_action: "Schedule 30m demo".into(),
                eta: "2 hours".into(),
                rationale: "Priority-driven. Similar cases: D001, D003".into(),
                ..ActionPlan::default()
            },
            similar: vec![
                SimilarCase {
                    deal_id: "D001".into(),
                    company: "Acme Cloud".into(),
                    score: 0.321,
                    outcome: "Won".into(),
                    ..SimilarCase::default()
                },
                SimilarCase {
                    deal_id: "D003".into(),
                    company: "FinSys".into(),
                    score: 0.198,
                    outcome: "Won".into(),
                    ..SimilarCase::default()
                },
            ],
            draft: EmailDraft {
                subject: "Re: Acme Cloud".into(),
                body: "Hi Jane".into(),
            },
            ..Suggestion::default()
        }
    }

    #[test]
    fn suggestion_card_renders_sections_in_order() {
        let card = suggestion(&sample());
        let positions: Vec<usize> = [
            "Jane Doe @ Acme Cloud",
            "Priority:",
            "Schedule 30m demo (ETA: 2 hours)",
            "Rationale:",
            "Similar past cases",
            "D001",
            "D003",
            "Draft Email",
            "Re: Acme Cloud",
            "Hi Jane",
        ]
        .iter()
        .map(|needle| card.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "sections must keep their card order");
    }

    #[test]
    fn similar_cases_keep_server_order() {
        let mut s = sample();
        s.similar.reverse();
        let card = suggestion(&s);
        assert!(card.find("D003").unwrap() < card.find("D001").unwrap());
    }

    #[test]
    fn empty_similar_list_renders_empty_not_error() {
        let mut s = sample();
        s.similar.clear();
        let card = suggestion(&s);
        assert!(card.contains("<ul>\n</ul>"));
    }

    #[test]
    fn server_text_is_escaped_into_markup() {
        let mut s = sample();
        s.draft.body = "cost < $100k && uptime > 99.9%".into();
        s.context.company = "A<B&C".into();
        let card = suggestion(&s);
        assert!(card.contains("cost &lt; $100k &amp;&amp; uptime &gt; 99.9%"));
        assert!(card.contains("A&lt;B&amp;C"));
        assert!(!card.contains("cost < $100k"));
    }

    #[test]
    fn sparse_suggestion_renders_blanks() {
        let card = suggestion(&Suggestion::default());
        assert!(card.contains("<strong>Lead:</strong>  @ "));
        assert!(card.contains("<ul>\n</ul>"));
    }

    #[test]
    fn execution_result_pretty_prints_audit() {
        let card = execution_result(&json!({"event": "approved_and_executed", "suggestion_id": "x"}));
        assert!(card.contains("Execution Result"));
        assert!(card.contains("\"event\": \"approved_and_executed\""));
        assert!(card.contains("demo mode"));
    }

    #[test]
    fn error_card_names_the_stage() {
        let card = error("lead submission", "/api/lead returned 503: maintenance");
        assert!(card.contains("Request Failed"));
        assert!(card.contains("lead submission"));
        assert!(card.contains("503"));
        assert!(card.contains("retry"));
    }
}
