//! HTML preview and print rendering.
//!
//! The template is embedded at compile time and renders a self-contained
//! document: styles inline, payment QR as a data URI. The browser does the
//! actual printing; a print render just adds a `window.print()` call.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use quote_core::calculations::QuoteTotals;
use quote_core::models::{CompanyDetails, Quotation};

use crate::utils::{format_money, format_rupees, format_signed_money, vehicle_label};

const TEMPLATE: &str = include_str!("../templates/quote.html.tera");

#[derive(Serialize)]
struct QuoteView {
    number: String,
    date: String,
    status: &'static str,
    customer_name: String,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    customer_address: Option<String>,
    vehicle: Option<String>,
    notes_lines: Vec<String>,
}

impl QuoteView {
    fn new(quote: &Quotation) -> Self {
        Self {
            number: quote.quote_number.clone(),
            date: quote.date.format("%d/%m/%Y").to_string(),
            status: quote.status.as_str(),
            customer_name: quote.customer_name.clone(),
            customer_phone: quote.customer_phone.clone(),
            customer_email: quote.customer_email.clone(),
            customer_address: quote.customer_address.clone(),
            vehicle: vehicle_label(quote),
            notes_lines: quote
                .notes
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The profile fields the document shows. The password never enters the
/// render context.
#[derive(Serialize)]
struct CompanyView {
    name: String,
    tagline: String,
    address: String,
    phone: String,
    email: String,
    bank_name: String,
    account_name: String,
    account_number: String,
    ifsc: String,
    upi_id: String,
    payment_qr: Option<String>,
}

impl CompanyView {
    fn new(company: &CompanyDetails) -> Self {
        Self {
            name: company.name.clone(),
            tagline: company.tagline.clone(),
            address: company.address.clone(),
            phone: company.phone.clone(),
            email: company.email.clone(),
            bank_name: company.bank_name.clone(),
            account_name: company.account_name.clone(),
            account_number: company.account_number.clone(),
            ifsc: company.ifsc.clone(),
            upi_id: company.upi_id.clone(),
            payment_qr: company.payment_qr.clone(),
        }
    }
}

#[derive(Serialize)]
struct LineRowView {
    index: usize,
    description: String,
    quantity: String,
    unit_price: String,
    amount: String,
}

/// Totals preformatted for display, so the template stays arithmetic-free.
#[derive(Serialize)]
struct TotalsView {
    gross_total: String,
    subtotal: String,
    total_tax: String,
    tax_rate: String,
    discount: String,
    has_discount: bool,
    round_off: String,
    has_round_off: bool,
    grand_total: String,
}

impl TotalsView {
    fn new(
        totals: &QuoteTotals,
        quote: &Quotation,
    ) -> Self {
        Self {
            gross_total: format_money(totals.gross_total),
            subtotal: format_money(totals.subtotal),
            total_tax: format_money(totals.total_tax),
            tax_rate: quote.tax_rate.to_string(),
            discount: format_money(quote.discount),
            has_discount: !quote.discount.is_zero(),
            round_off: format_signed_money(totals.round_off),
            has_round_off: !totals.round_off.is_zero(),
            grand_total: format_rupees(totals.grand_total),
        }
    }
}

/// Renders the quotation as a standalone HTML document.
pub fn render_quote_html(
    quote: &Quotation,
    company: &CompanyDetails,
    auto_print: bool,
) -> anyhow::Result<String> {
    let totals = QuoteTotals::for_quote(quote);
    let rows: Vec<LineRowView> = quote
        .line_items
        .iter()
        .enumerate()
        .map(|(i, item)| LineRowView {
            index: i + 1,
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: format_money(item.unit_price),
            amount: format_money(item.amount()),
        })
        .collect();

    let mut tera = Tera::default();
    tera.add_raw_template("quote.html", TEMPLATE)
        .context("registering the quotation template")?;

    let mut context = Context::new();
    context.insert("quote", &QuoteView::new(quote));
    context.insert("company", &CompanyView::new(company));
    context.insert("rows", &rows);
    context.insert("totals", &TotalsView::new(&totals, quote));
    context.insert("auto_print", &auto_print);

    tera.render("quote.html", &context)
        .context("rendering the quotation")
}

/// Renders the document and writes it as `<quote number>.html` under `dir`.
pub fn write_preview(
    dir: &Path,
    quote: &Quotation,
    company: &CompanyDetails,
    auto_print: bool,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating preview directory {}", dir.display()))?;
    let path = dir.join(format!("{}.html", quote.quote_number));
    let html = render_quote_html(quote, company, auto_print)?;
    fs::write(&path, html).with_context(|| format!("writing preview {}", path.display()))?;
    debug!(path = %path.display(), "preview written");
    Ok(path)
}
