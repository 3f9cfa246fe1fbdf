pub mod schema;

pub use schema::{ApprovalConfig, Config, LeadDefaults, ServiceConfig, StaleResponsePolicy};
