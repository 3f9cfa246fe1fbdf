use clap::{Parser, Subcommand};

/// `LeadPilot` - sales-assist console built in Rust.
#[derive(Parser, Debug)]
#[command(name = "leadpilot")]
#[command(version = "0.1.0")]
#[command(about = "Lead intake, suggestion review, approval, audit.", long_about = None)]
pub struct Cli {
    /// Override the configured service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive operator session
    Run,

    /// Submit a single lead and print the returned suggestion
    Submit {
        /// Company name (blank: configured default)
        #[arg(long)]
        company: Option<String>,

        /// Contact name (blank: configured default)
        #[arg(long)]
        contact_name: Option<String>,

        /// Contact role (blank: configured default)
        #[arg(long)]
        role: Option<String>,

        /// Pain points (blank: configured default)
        #[arg(long)]
        painpoints: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Approve the suggestion right after rendering it
        #[arg(long)]
        approve: bool,

        /// Replace the draft body before approving (implies --approve)
        #[arg(long)]
        body: Option<String>,
    },

    /// Fetch and print the audit trail
    Audit,

    /// Fetch and print current analytics
    Analytics,
}
