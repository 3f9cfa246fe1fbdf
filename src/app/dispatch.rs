use anyhow::Result;
use tracing::info;

use crate::cli::commands::{Cli, Commands};
use crate::config::Config;
use crate::lead::LeadForm;
use crate::session::Session;
use crate::ui;
use crate::view::plain;

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }
    info!(base_url = %config.service.base_url, "dispatching");

    match cli.command {
        Commands::Run => ui::console::run(Session::new(&config)).await,
        Commands::Submit {
            company,
            contact_name,
            role,
            painpoints,
            notes,
            approve,
            body,
        } => {
            let form = LeadForm {
                company: company.unwrap_or_default(),
                contact_name: contact_name.unwrap_or_default(),
                role: role.unwrap_or_default(),
                painpoints: painpoints.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            run_submit(&config, form, approve, body).await
        }
        Commands::Audit => run_audit(&config).await,
        Commands::Analytics => run_analytics(&config).await,
    }
}

/// One-shot submission: render the suggestion, optionally (with `--approve`
/// or `--body`) approve it in the same breath.
async fn run_submit(
    config: &Config,
    form: LeadForm,
    approve: bool,
    body: Option<String>,
) -> Result<()> {
    let mut session = Session::new(config);
    session.submit(form).await?;
    print_suggestion_region(&session);

    if approve || body.is_some() {
        if let Some(text) = body {
            if let Some(draft) = session.draft_mut() {
                draft.set_body(text);
            }
        }
        session.approve().await?;
        print_suggestion_region(&session);
        ui::console::print_panels(&session);
    }
    Ok(())
}

async fn run_audit(config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    session.refresh_audit().await?;
    println!("{}", session.view().audit().content().unwrap_or_default());
    Ok(())
}

async fn run_analytics(config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    session.refresh_analytics().await?;
    println!("{}", session.view().analytics().content().unwrap_or_default());
    Ok(())
}

fn print_suggestion_region(session: &Session) {
    if let Some(card) = session.view().suggestion().content() {
        println!("{}", plain::render(card));
    }
}
