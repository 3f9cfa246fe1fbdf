use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub lead_defaults: LeadDefaults,

    #[serde(default)]
    pub approval: ApprovalConfig,
}

// ── Suggestion service endpoint ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the suggestion/approval service (default: local demo server)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

// ── Lead form fallbacks ──────────────────────────────────────────

/// Substituted for empty form fields so the service always receives a
/// complete lead. Demo-reproducibility defaults, deliberately configuration
/// rather than hidden business logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadDefaults {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_contact_name")]
    pub contact_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_painpoints")]
    pub painpoints: String,
    #[serde(default)]
    pub notes: String,
}

fn default_company() -> String {
    "Acme Cloud".into()
}

fn default_contact_name() -> String {
    "Jane Doe".into()
}

fn default_role() -> String {
    "CTO".into()
}

fn default_painpoints() -> String {
    "High infra costs, cloud overspend".into()
}

impl Default for LeadDefaults {
    fn default() -> Self {
        Self {
            company: default_company(),
            contact_name: default_contact_name(),
            role: default_role(),
            painpoints: default_painpoints(),
            notes: String::new(),
        }
    }
}

// ── Approval behavior ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApprovalConfig {
    /// Also submit the edited subject line (default: false; the original
    /// wire contract carries only the edited body)
    #[serde(default)]
    pub submit_edited_subject: bool,
    /// What to do with an approval response that arrives after its
    /// suggestion was superseded (default: discard)
    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleResponsePolicy {
    /// Drop the late response; the current view stays untouched.
    #[default]
    Discard,
    /// Apply it unconditionally, replacing whatever is on screen.
    Overwrite,
}

// ── Load / save ──────────────────────────────────────────────────

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let leadpilot_dir = home.join(".leadpilot");
        let config_path = leadpilot_dir.join("config.toml");

        if !leadpilot_dir.exists() {
            fs::create_dir_all(&leadpilot_dir).context("Failed to create .leadpilot directory")?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        // Set computed path that is skipped during serialization
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
