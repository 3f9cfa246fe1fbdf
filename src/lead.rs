use rand::Rng;

use crate::config::LeadDefaults;
use crate::model::Lead;

/// Raw operator-entered form values, each optionally empty.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    pub company: String,
    pub contact_name: String,
    pub role: String,
    pub painpoints: String,
    pub notes: String,
}

/// Build a syntactically complete [`Lead`] from raw form values.
///
/// Empty fields fall back to the configured defaults so the suggestion
/// service always receives a full record, even from an empty form. Pure and
/// infallible: no validation, no retries on id collision.
pub fn build_lead(form: &LeadForm, defaults: &LeadDefaults) -> Lead {
    Lead {
        lead_id: generate_lead_id(),
        company: or_default(&form.company, &defaults.company),
        contact_name: or_default(&form.contact_name, &defaults.contact_name),
        role: or_default(&form.role, &defaults.role),
        painpoints: or_default(&form.painpoints, &defaults.painpoints),
        notes: or_default(&form.notes, &defaults.notes),
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

const LEAD_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const LEAD_ID_LEN: usize = 6;

/// Short random token prefixed `L-`.
///
/// Unique enough within a session; collisions are not retried and no
/// server-side uniqueness check exists.
pub fn generate_lead_id() -> String {
    let mut rng = rand::rng();
    let token: String = (0..LEAD_ID_LEN)
        .map(|_| LEAD_ID_CHARSET[rng.random_range(0..LEAD_ID_CHARSET.len())] as char)
        .collect();
    format!("L-{token}")
}
