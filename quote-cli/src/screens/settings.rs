//! Settings screen: the company profile behind every rendered quotation.
//!
//! Edits land on the in-memory profile and only persist on "Save and
//! return". A changed password is stored like any other field; the
//! running session stays open either way.

use anyhow::Result;
use comfy_table::{Cell, Table};
use inquire::{Password, Select, Text};
use rust_decimal::Decimal;

use super::Flow;
use crate::app::{MessageType, QuoteApp};
use crate::utils::parse_decimal;

pub(super) fn show(app: &mut QuoteApp) -> Result<Flow> {
    print_profile(app);

    let mut actions = vec![
        "Company name",
        "Tagline",
        "Address",
        "Phone",
        "Email",
        "Bank name",
        "Account name",
        "Account number",
        "IFSC",
        "UPI ID",
        "Default tax rate",
        "Default notes",
        "Change password",
        "Attach payment QR",
    ];
    if app.company.payment_qr.is_some() {
        actions.push("Remove payment QR");
    }
    actions.extend(["Save and return", "Discard and return"]);

    let choice = Select::new("Settings:", actions)
        .with_page_size(17)
        .prompt_skippable()?;

    match choice {
        Some("Save and return") => {
            if app.save_company() {
                app.close_settings();
            }
        }
        Some("Discard and return") | None => {
            app.discard_company_edits();
            app.close_settings();
        }
        Some("Change password") => change_password(app)?,
        Some("Attach payment QR") => {
            app.start_qr_pick();
            app.show_message(
                "Pick the image in the file dialog; it lands here once read",
                MessageType::Info,
            );
        }
        Some("Remove payment QR") => {
            app.company.payment_qr = None;
            app.show_message("Payment QR removed; save to keep it that way", MessageType::Info);
        }
        Some("Default tax rate") => edit_tax_rate(app)?,
        Some(field) => edit_field(app, field)?,
    }
    Ok(Flow::Continue)
}

fn print_profile(app: &QuoteApp) {
    let company = &app.company;
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("Company name"), Cell::new(&company.name)]);
    table.add_row(vec![Cell::new("Tagline"), Cell::new(&company.tagline)]);
    table.add_row(vec![Cell::new("Address"), Cell::new(&company.address)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&company.phone)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&company.email)]);
    table.add_row(vec![Cell::new("Bank name"), Cell::new(&company.bank_name)]);
    table.add_row(vec![Cell::new("Account name"), Cell::new(&company.account_name)]);
    table.add_row(vec![Cell::new("Account number"), Cell::new(&company.account_number)]);
    table.add_row(vec![Cell::new("IFSC"), Cell::new(&company.ifsc)]);
    table.add_row(vec![Cell::new("UPI ID"), Cell::new(&company.upi_id)]);
    table.add_row(vec![
        Cell::new("Default tax rate"),
        Cell::new(company.default_tax_rate),
    ]);
    table.add_row(vec![Cell::new("Default notes"), Cell::new(&company.default_notes)]);
    table.add_row(vec![
        Cell::new("Password"),
        Cell::new(if company.password.is_some() { "set" } else { "not set" }),
    ]);
    table.add_row(vec![
        Cell::new("Payment QR"),
        Cell::new(if company.payment_qr.is_some() { "attached" } else { "none" }),
    ]);
    println!("{table}");
}

/// Prompts for one of the plain text fields, pre-filled with its
/// current value. Dismissing the prompt keeps the field as it was.
fn edit_field(app: &mut QuoteApp, field: &str) -> Result<()> {
    let target = match field {
        "Company name" => &mut app.company.name,
        "Tagline" => &mut app.company.tagline,
        "Address" => &mut app.company.address,
        "Phone" => &mut app.company.phone,
        "Email" => &mut app.company.email,
        "Bank name" => &mut app.company.bank_name,
        "Account name" => &mut app.company.account_name,
        "Account number" => &mut app.company.account_number,
        "IFSC" => &mut app.company.ifsc,
        "UPI ID" => &mut app.company.upi_id,
        "Default notes" => &mut app.company.default_notes,
        _ => return Ok(()),
    };
    if let Some(value) = Text::new(&format!("{field}:"))
        .with_initial_value(target)
        .prompt_skippable()?
    {
        *target = value;
    }
    Ok(())
}

fn edit_tax_rate(app: &mut QuoteApp) -> Result<()> {
    let current = app.company.default_tax_rate.to_string();
    let Some(input) = Text::new("Default tax rate (%):")
        .with_initial_value(&current)
        .prompt_skippable()?
    else {
        return Ok(());
    };
    match parse_decimal(&input) {
        Ok(rate) if rate >= Decimal::ZERO => app.company.default_tax_rate = rate,
        _ => app.show_message("Tax rate must be a non-negative number", MessageType::Error),
    }
    Ok(())
}

fn change_password(app: &mut QuoteApp) -> Result<()> {
    let Some(input) = Password::new("New password (empty removes the lock):")
        .without_confirmation()
        .prompt_skippable()?
    else {
        return Ok(());
    };
    if input.is_empty() {
        app.company.password = None;
        app.show_message(
            "Password removed; takes effect from the next start after saving",
            MessageType::Info,
        );
    } else {
        app.company.password = Some(input);
        app.show_message(
            "Password set; takes effect from the next start after saving",
            MessageType::Info,
        );
    }
    Ok(())
}
