//! Listing screen: every saved quotation and the actions on them.

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Table};
use inquire::{Confirm, Select, Text};
use rfd::FileDialog;
use tracing::warn;
use uuid::Uuid;

use quote_core::calculations::QuoteTotals;

use super::Flow;
use crate::app::{MessageType, QuoteApp};
use crate::utils::{format_rupees, open_external, vehicle_label};
use crate::{preview, share};

pub(super) fn show(app: &mut QuoteApp) -> Result<Flow> {
    print_table(app);

    let mut actions = vec!["New quotation"];
    if !app.quotes.is_empty() {
        actions.extend(["Edit", "Delete", "Preview", "Print", "Share"]);
    }
    actions.push("Search");
    if !app.search.trim().is_empty() {
        actions.push("Clear search");
    }
    actions.extend(["Settings", "Backup", "Restore"]);
    if app.gate.requires_password() {
        actions.push("Lock");
    }
    actions.push("Quit");

    let choice = Select::new("Action:", actions)
        .with_page_size(14)
        .prompt_skippable()?;

    match choice {
        Some("New quotation") => app.start_new_quote(Local::now().date_naive()),
        Some("Edit") => {
            if let Some(id) = pick_quote(app, "Edit which quotation?")? {
                app.edit_quote(id);
            }
        }
        Some("Delete") => delete(app)?,
        Some("Preview") => open_document(app, false)?,
        Some("Print") => open_document(app, true)?,
        Some("Share") => share_quote(app)?,
        Some("Search") => {
            if let Some(query) = Text::new("Search (number, customer, phone, vehicle):")
                .with_initial_value(&app.search)
                .prompt_skippable()?
            {
                app.search = query;
            }
        }
        Some("Clear search") => app.search.clear(),
        Some("Settings") => app.open_settings(),
        Some("Backup") => backup(app),
        Some("Restore") => restore(app)?,
        Some("Lock") => confirm_lock(app)?,
        Some("Quit") | None => return Ok(Flow::Quit),
        Some(_) => {}
    }
    Ok(Flow::Continue)
}

fn print_table(app: &QuoteApp) {
    let rows = app.visible_quotes();

    let needle = app.search.trim();
    if !needle.is_empty() {
        println!("Filter \"{needle}\": {} of {} shown", rows.len(), app.quotes.len());
    }

    if rows.is_empty() {
        if needle.is_empty() {
            println!("No quotations yet.");
        }
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Number", "Date", "Customer", "Vehicle", "Status", "Total",
    ]);
    for quote in rows {
        let totals = QuoteTotals::for_quote(quote);
        table.add_row(vec![
            Cell::new(&quote.quote_number),
            Cell::new(quote.date.format("%d/%m/%Y")),
            Cell::new(&quote.customer_name),
            Cell::new(vehicle_label(quote).unwrap_or_default()),
            Cell::new(quote.status.as_str()),
            Cell::new(format_rupees(totals.grand_total)),
        ]);
    }
    println!("{table}");
}

/// One selectable row in the quotation pickers.
struct QuotePick {
    id: Uuid,
    label: String,
}

impl std::fmt::Display for QuotePick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Lets the operator pick one of the currently visible quotations.
/// `None` means there was nothing to pick or the prompt was dismissed.
fn pick_quote(app: &QuoteApp, prompt: &str) -> Result<Option<Uuid>> {
    let picks: Vec<QuotePick> = app
        .visible_quotes()
        .into_iter()
        .map(|quote| QuotePick {
            id: quote.id,
            label: format!(
                "{}  {}  {}  {}",
                quote.quote_number,
                quote.date.format("%d/%m/%Y"),
                quote.customer_name,
                format_rupees(QuoteTotals::for_quote(quote).grand_total),
            ),
        })
        .collect();
    if picks.is_empty() {
        return Ok(None);
    }
    let pick = Select::new(prompt, picks)
        .with_page_size(10)
        .prompt_skippable()?;
    Ok(pick.map(|p| p.id))
}

fn delete(app: &mut QuoteApp) -> Result<()> {
    let Some(id) = pick_quote(app, "Delete which quotation?")? else {
        return Ok(());
    };
    let Some(number) = app.quote(id).map(|q| q.quote_number.clone()) else {
        return Ok(());
    };
    let confirmed = Confirm::new(&format!("Delete {number}? This cannot be undone."))
        .with_default(false)
        .prompt_skippable()?
        .unwrap_or(false);
    if confirmed {
        app.delete_quote(id);
    }
    Ok(())
}

/// Renders the chosen quotation to an HTML file and hands it to the
/// system browser. With `auto_print` the page opens its print dialog.
fn open_document(app: &mut QuoteApp, auto_print: bool) -> Result<()> {
    let prompt = if auto_print {
        "Print which quotation?"
    } else {
        "Preview which quotation?"
    };
    let Some(id) = pick_quote(app, prompt)? else {
        return Ok(());
    };
    let Some(quote) = app.quote(id) else {
        return Ok(());
    };
    match preview::write_preview(&app.preview_dir, quote, &app.company, auto_print) {
        Ok(path) => {
            if let Err(e) = open_external(&path) {
                warn!("could not launch a browser: {e:#}");
            }
            app.show_message(
                format!("Written to {}", path.display()),
                MessageType::Success,
            );
        }
        Err(e) => {
            app.show_message(
                format!("Could not render the quotation: {e:#}"),
                MessageType::Error,
            );
        }
    }
    Ok(())
}

fn share_quote(app: &mut QuoteApp) -> Result<()> {
    let Some(id) = pick_quote(app, "Share which quotation?")? else {
        return Ok(());
    };
    let Some(quote) = app.quote(id) else {
        return Ok(());
    };

    let message = share::share_message(quote, &app.company);
    let subject = share::email_subject(quote, &app.company);
    let whatsapp = share::whatsapp_link(quote.customer_phone.as_deref(), &message);
    let mailto = share::mailto_link(quote.customer_email.as_deref(), &subject, &message);

    let Some(channel) =
        Select::new("Share via:", vec!["WhatsApp", "Email", "Show text"]).prompt_skippable()?
    else {
        return Ok(());
    };
    match channel {
        "WhatsApp" => launch(app, &whatsapp),
        "Email" => launch(app, &mailto),
        _ => println!("\n{message}\n"),
    }
    Ok(())
}

fn launch(app: &mut QuoteApp, link: &str) {
    if let Err(e) = open_external(link) {
        warn!("could not launch an opener: {e:#}");
        app.show_message(format!("Open this link yourself: {link}"), MessageType::Info);
    }
}

fn confirm_lock(app: &mut QuoteApp) -> Result<()> {
    let confirmed = Confirm::new("Lock the app and return to the password screen?")
        .with_default(true)
        .prompt_skippable()?
        .unwrap_or(false);
    if confirmed {
        app.lock();
    }
    Ok(())
}

fn backup(app: &mut QuoteApp) {
    let Some(path) = FileDialog::new()
        .set_title("Write backup to")
        .set_file_name("tyrequote-backup.json")
        .save_file()
    else {
        app.show_message("Backup cancelled", MessageType::Info);
        return;
    };
    match app.backup_to(&path) {
        Ok(()) => app.show_message(
            format!("Backup written to {}", path.display()),
            MessageType::Success,
        ),
        Err(e) => app.show_message(format!("Backup failed: {e:#}"), MessageType::Error),
    }
}

fn restore(app: &mut QuoteApp) -> Result<()> {
    let Some(path) = FileDialog::new()
        .set_title("Restore from backup")
        .add_filter("Backup", &["json"])
        .pick_file()
    else {
        app.show_message("Restore cancelled", MessageType::Info);
        return Ok(());
    };
    let confirmed = Confirm::new("Replace all saved quotations and settings with this backup?")
        .with_default(false)
        .prompt_skippable()?
        .unwrap_or(false);
    if !confirmed {
        return Ok(());
    }
    match app.restore_from(&path) {
        Ok(count) => app.show_message(
            format!("Restored {count} quotation(s)"),
            MessageType::Success,
        ),
        Err(e) => app.show_message(format!("Restore failed: {e:#}"), MessageType::Error),
    }
    Ok(())
}
