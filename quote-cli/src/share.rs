//! Share-link construction.
//!
//! A quotation is shared as a prefilled message: plain text the operator can
//! paste anywhere, or a `mailto:` / WhatsApp deep link handed to the platform
//! opener. Fire and forget, no delivery tracking.

use urlencoding::encode;

use quote_core::calculations::QuoteTotals;
use quote_core::models::{CompanyDetails, Quotation};

use crate::utils::format_rupees;

/// The prefilled message text for one quotation.
pub fn share_message(
    quote: &Quotation,
    company: &CompanyDetails,
) -> String {
    let totals = QuoteTotals::for_quote(quote);
    format!(
        "Hello {customer},\n\n\
         Your quotation {number} dated {date} from {company} is ready.\n\
         Total amount: {total}.\n\n\
         Thank you for your business!\n\
         {company}\n\
         {phone}",
        customer = quote.customer_name,
        number = quote.quote_number,
        date = quote.date.format("%d/%m/%Y"),
        company = company.name,
        total = format_rupees(totals.grand_total),
        phone = company.phone,
    )
}

pub fn email_subject(
    quote: &Quotation,
    company: &CompanyDetails,
) -> String {
    format!("Quotation {} from {}", quote.quote_number, company.name)
}

/// `mailto:` link with percent-encoded subject and body.
pub fn mailto_link(
    recipient: Option<&str>,
    subject: &str,
    body: &str,
) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient.unwrap_or(""),
        encode(subject),
        encode(body),
    )
}

/// WhatsApp deep link. The phone number is reduced to digits; without one
/// the link opens the contact picker instead.
pub fn whatsapp_link(
    phone: Option<&str>,
    text: &str,
) -> String {
    let digits: String = phone
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        format!("https://wa.me/?text={}", encode(text))
    } else {
        format!("https://wa.me/{digits}?text={}", encode(text))
    }
}
