//! Editing screen: one open draft, one action per pass.
//!
//! The draft is taken out of the app for the duration of a pass so the
//! prompts can mutate it freely, then handed back (or routed into
//! save/cancel, which consume it).

use anyhow::Result;
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table};
use inquire::{Confirm, DateSelect, Select, Text};
use rust_decimal::Decimal;

use quote_core::calculations::QuoteTotals;
use quote_core::models::{LineItem, QuoteStatus};

use super::Flow;
use crate::app::{QuoteApp, Screen};
use crate::forms::{LineItemForm, QuoteForm};
use crate::utils::{format_money, format_rupees, format_signed_money, parse_decimal};

pub(super) fn show(app: &mut QuoteApp) -> Result<Flow> {
    let Some(mut form) = app.form.take() else {
        // Nothing to edit; fall back rather than looping on this screen.
        app.current_screen = Screen::Listing;
        return Ok(Flow::Continue);
    };

    print_draft(&form);

    let mut actions = vec!["Customer details", "Vehicle details", "Date", "Add line item"];
    if !form.line_items.is_empty() {
        actions.extend(["Edit line item", "Remove line item"]);
    }
    actions.extend(["Discount", "Tax rate", "Notes", "Status", "Save", "Cancel"]);

    let choice = Select::new("Edit:", actions)
        .with_page_size(12)
        .prompt_skippable()?;

    match choice {
        Some("Save") => {
            app.form = Some(form);
            app.save_draft();
        }
        Some("Cancel") | None => {
            let discard = Confirm::new("Discard this draft?")
                .with_default(false)
                .prompt_skippable()?
                .unwrap_or(false);
            app.form = Some(form);
            if discard {
                app.cancel_draft();
            }
        }
        Some(action) => {
            apply(&mut form, action)?;
            app.form = Some(form);
        }
    }
    Ok(Flow::Continue)
}

fn apply(form: &mut QuoteForm, action: &str) -> Result<()> {
    match action {
        "Customer details" => edit_customer(form)?,
        "Vehicle details" => edit_vehicle(form)?,
        "Date" => edit_date(form)?,
        "Add line item" => add_line_item(form)?,
        "Edit line item" => edit_line_item(form)?,
        "Remove line item" => remove_line_item(form)?,
        "Discount" => edit_text(&mut form.discount, "Discount (₹):")?,
        "Tax rate" => edit_text(&mut form.tax_rate, "Tax rate (%):")?,
        "Notes" => edit_text(&mut form.notes, "Notes:")?,
        "Status" => edit_status(form)?,
        _ => {}
    }
    Ok(())
}

/// Prompts for a single text field, pre-filled with its current value.
/// Dismissing the prompt leaves the field untouched.
fn edit_text(value: &mut String, prompt: &str) -> Result<()> {
    if let Some(input) = Text::new(prompt)
        .with_initial_value(value)
        .prompt_skippable()?
    {
        *value = input;
    }
    Ok(())
}

fn edit_customer(form: &mut QuoteForm) -> Result<()> {
    edit_text(&mut form.customer_name, "Customer name:")?;
    edit_text(&mut form.customer_phone, "Phone:")?;
    edit_text(&mut form.customer_email, "Email:")?;
    edit_text(&mut form.customer_address, "Address:")?;
    Ok(())
}

fn edit_vehicle(form: &mut QuoteForm) -> Result<()> {
    edit_text(&mut form.vehicle_make, "Vehicle make:")?;
    edit_text(&mut form.vehicle_model, "Vehicle model:")?;
    edit_text(&mut form.vehicle_registration, "Registration number:")?;
    Ok(())
}

fn edit_date(form: &mut QuoteForm) -> Result<()> {
    let current: NaiveDate = form
        .date
        .parse()
        .unwrap_or_else(|_| Local::now().date_naive());
    if let Some(date) = DateSelect::new("Quotation date:")
        .with_default(current)
        .prompt_skippable()?
    {
        form.date = date.to_string();
    }
    Ok(())
}

fn add_line_item(form: &mut QuoteForm) -> Result<()> {
    let mut row = LineItemForm {
        quantity: "1".to_string(),
        ..Default::default()
    };
    prompt_row(&mut row)?;
    if !row.is_blank() {
        form.line_items.push(row);
    }
    Ok(())
}

fn edit_line_item(form: &mut QuoteForm) -> Result<()> {
    let Some(index) = pick_row(form, "Edit which line?")? else {
        return Ok(());
    };
    if let Some(row) = form.line_items.get_mut(index) {
        prompt_row(row)?;
    }
    Ok(())
}

fn remove_line_item(form: &mut QuoteForm) -> Result<()> {
    if let Some(index) = pick_row(form, "Remove which line?")? {
        if index < form.line_items.len() {
            form.line_items.remove(index);
        }
    }
    Ok(())
}

/// Prompts for the three fields of one row in place. Dismissing the
/// first prompt aborts; later dismissals keep what is already there.
fn prompt_row(row: &mut LineItemForm) -> Result<()> {
    let Some(description) = Text::new("Description:")
        .with_initial_value(&row.description)
        .prompt_skippable()?
    else {
        return Ok(());
    };
    row.description = description;

    if let Some(quantity) = Text::new("Quantity:")
        .with_initial_value(&row.quantity)
        .prompt_skippable()?
    {
        row.quantity = quantity;
    }
    if let Some(price) = Text::new("Unit price (tax inclusive):")
        .with_initial_value(&row.unit_price)
        .prompt_skippable()?
    {
        row.unit_price = price;
    }
    Ok(())
}

/// Row picker for edit/remove. The index rides in front of the label
/// and is parsed back out after selection.
fn pick_row(form: &QuoteForm, prompt: &str) -> Result<Option<usize>> {
    let labels: Vec<String> = form
        .line_items
        .iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{}. {} x {} @ {}",
                i + 1,
                row.description,
                row.quantity,
                row.unit_price
            )
        })
        .collect();
    let Some(label) = Select::new(prompt, labels)
        .with_page_size(10)
        .prompt_skippable()?
    else {
        return Ok(None);
    };
    let number = label
        .split('.')
        .next()
        .and_then(|n| n.parse::<usize>().ok());
    Ok(number.map(|n| n - 1))
}

fn edit_status(form: &mut QuoteForm) -> Result<()> {
    if let Some(status) =
        Select::new("Status:", QuoteStatus::all().to_vec()).prompt_skippable()?
    {
        form.status = status;
    }
    Ok(())
}

// ── rendering ────────────────────────────────────────────────────────────

fn print_draft(form: &QuoteForm) {
    println!();
    println!("{}  dated {}  [{}]", form.quote_number, form.date, form.status);
    let customer = form.customer_name.trim();
    if customer.is_empty() {
        println!("Customer: (not set)");
    } else {
        println!("Customer: {customer}");
    }

    if form.line_items.is_empty() {
        println!("No line items yet.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["#", "Description", "Qty", "Unit Price", "Amount"]);
        for (i, row) in form.line_items.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&row.description),
                Cell::new(&row.quantity),
                Cell::new(&row.unit_price),
                Cell::new(row_amount(row)),
            ]);
        }
        println!("{table}");
    }

    print_totals(form);

    if !form.errors.is_empty() {
        println!("Fix before saving:");
        for error in &form.errors {
            println!("  - {error}");
        }
    }
}

fn row_amount(row: &LineItemForm) -> String {
    match (parse_decimal(&row.quantity), parse_decimal(&row.unit_price)) {
        (Ok(quantity), Ok(price)) => format_money(quantity * price),
        _ => "?".to_string(),
    }
}

/// Live totals over whatever rows parse right now. Unparseable fields
/// count as zero here; validation still catches them on save.
fn print_totals(form: &QuoteForm) {
    let items: Vec<LineItem> = form
        .line_items
        .iter()
        .filter_map(|row| {
            let quantity = parse_decimal(&row.quantity).ok()?;
            let price = parse_decimal(&row.unit_price).ok()?;
            Some(LineItem::new(row.description.clone(), quantity, price))
        })
        .collect();
    let discount = parse_decimal(&form.discount).unwrap_or(Decimal::ZERO);
    let tax_rate = parse_decimal(&form.tax_rate).unwrap_or(Decimal::ZERO);
    let totals = QuoteTotals::calculate(&items, discount, tax_rate);

    println!(
        "Subtotal {}   Tax {}   Gross {}",
        format_money(totals.subtotal),
        format_money(totals.total_tax),
        format_money(totals.gross_total)
    );
    if !discount.is_zero() {
        println!(
            "Discount {}   After discount {}",
            format_money(discount),
            format_money(totals.total_after_discount)
        );
    }
    if !totals.round_off.is_zero() {
        println!("Round off {}", format_signed_money(totals.round_off));
    }
    println!("Grand total {}", format_rupees(totals.grand_total));
}
