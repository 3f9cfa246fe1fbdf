//! Interactive operator session: lead form, suggestion review, draft
//! editing, approval, and panel display.

use anyhow::Result;
use dialoguer::{Confirm, Editor, Input, Select};

use crate::lead::LeadForm;
use crate::session::Session;
use crate::ui::style;
use crate::view::{Region, plain};

pub async fn run(mut session: Session) -> Result<()> {
    banner();
    loop {
        let form = prompt_lead_form(&session)?;
        if session.submit(form).await.is_err() {
            print_suggestion(&session);
            print_error(&session);
            if !another_lead()? {
                return Ok(());
            }
            continue;
        }
        print_suggestion(&session);
        if !review_loop(&mut session).await? {
            return Ok(());
        }
    }
}

fn banner() {
    println!();
    println!("  {}", style::header("LeadPilot"));
    println!(
        "  {}",
        style::dim("lead intake → suggestion → approval → audit")
    );
    println!(
        "  {}",
        style::dim("Leave a field blank to use its demo default.")
    );
    println!();
}

fn prompt_lead_form(session: &Session) -> Result<LeadForm> {
    let defaults = session.defaults();
    Ok(LeadForm {
        company: prompt_field("Company", &defaults.company)?,
        contact_name: prompt_field("Contact name", &defaults.contact_name)?,
        role: prompt_field("Role", &defaults.role)?,
        painpoints: prompt_field("Pain points", &defaults.painpoints)?,
        notes: prompt_field("Notes", &defaults.notes)?,
    })
}

fn prompt_field(label: &str, fallback: &str) -> Result<String> {
    let prompt = if fallback.is_empty() {
        format!("  {label}")
    } else {
        format!("  {label} [{fallback}]")
    };
    Ok(Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Review menu for the live suggestion. Returns `true` to start a new lead,
/// `false` to quit.
async fn review_loop(session: &mut Session) -> Result<bool> {
    loop {
        let choices = [
            "Approve & execute",
            "Edit body",
            "Edit subject",
            "Refresh panels",
            "New lead",
            "Quit",
        ];
        let choice = Select::new()
            .with_prompt("  Next")
            .items(&choices)
            .default(0)
            .interact()?;
        match choice {
            0 => {
                if session.approve().await.is_ok() {
                    print_suggestion(session);
                    print_panels(session);
                    println!("  {} approval recorded", style::success("✓"));
                    return another_lead();
                }
                print_error(session);
            }
            1 => edit_body(session)?,
            2 => edit_subject(session)?,
            3 => {
                refresh_panels(session).await;
                print_panels(session);
            }
            4 => return Ok(true),
            _ => return Ok(false),
        }
    }
}

fn edit_body(session: &mut Session) -> Result<()> {
    let Some(draft) = session.draft_mut() else {
        return Ok(());
    };
    if let Some(edited) = Editor::new().edit(draft.body())? {
        draft.set_body(edited);
        println!("  {} body updated", style::success("✓"));
    }
    Ok(())
}

fn edit_subject(session: &mut Session) -> Result<()> {
    let Some(draft) = session.draft_mut() else {
        return Ok(());
    };
    let edited: String = Input::new()
        .with_prompt("  Subject")
        .with_initial_text(draft.subject().to_string())
        .interact_text()?;
    draft.set_subject(edited);
    Ok(())
}

async fn refresh_panels(session: &mut Session) {
    // Failures land in the error region; show them, keep the session going.
    let analytics = session.refresh_analytics().await;
    let audit = session.refresh_audit().await;
    if analytics.is_err() || audit.is_err() {
        print_error(session);
    }
}

fn another_lead() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("  Submit another lead?")
        .default(true)
        .interact()?)
}

// ── Region printing ─────────────────────────────────────────────────────

fn print_suggestion(session: &Session) {
    if let Some(card) = session.view().suggestion().content() {
        println!("\n{}\n", plain::render(card));
    }
}

pub fn print_panels(session: &Session) {
    panel("Analytics", session.view().analytics());
    panel("Audit trail", session.view().audit());
}

fn panel(title: &str, region: &Region) {
    println!("\n{}", style::header(title));
    if let Some(at) = region.refreshed_at() {
        println!("{}", style::dim(format!("refreshed {}", at.format("%H:%M:%S UTC"))));
    }
    match region.content() {
        Some(content) => println!("{content}"),
        None => println!("{}", style::dim("(nothing yet)")),
    }
}

fn print_error(session: &Session) {
    if let Some(message) = session.view().error().content() {
        println!("\n  {} {}", style::yellow("✗"), message);
    }
}
