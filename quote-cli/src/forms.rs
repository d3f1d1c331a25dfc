use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use quote_core::models::{LineItem, QuoteStatus, Quotation};

use crate::utils::parse_decimal;

/// One editable line row. All fields stay strings until validation.
#[derive(Debug, Clone, Default)]
pub struct LineItemForm {
    /// Kept when editing an existing row so saving preserves its identity.
    pub id: Option<Uuid>,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
}

impl LineItemForm {
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            id: Some(item.id),
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
            && self.quantity.trim().is_empty()
            && self.unit_price.trim().is_empty()
    }
}

/// Form state for creating or editing a quotation.
#[derive(Debug, Clone, Default)]
pub struct QuoteForm {
    /// `None` while drafting a new quotation; set when editing a saved one.
    pub id: Option<Uuid>,
    pub quote_number: String,
    pub date: String,

    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,

    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_registration: String,

    pub line_items: Vec<LineItemForm>,
    pub discount: String,
    pub tax_rate: String,
    pub notes: String,
    pub status: QuoteStatus,

    /// Validation errors from the last `validate` call.
    pub errors: Vec<String>,
}

impl QuoteForm {
    /// Fresh draft: new number, today's date, company defaults filled in.
    pub fn new_draft(
        quote_number: String,
        today: NaiveDate,
        default_tax_rate: Decimal,
        default_notes: String,
    ) -> Self {
        Self {
            quote_number,
            date: today.to_string(),
            tax_rate: default_tax_rate.to_string(),
            notes: default_notes,
            ..Default::default()
        }
    }

    /// Loads a saved quotation back into editable text fields.
    /// The quote number is carried over, never regenerated.
    pub fn from_quote(quote: &Quotation) -> Self {
        Self {
            id: Some(quote.id),
            quote_number: quote.quote_number.clone(),
            date: quote.date.to_string(),
            customer_name: quote.customer_name.clone(),
            customer_phone: quote.customer_phone.clone().unwrap_or_default(),
            customer_email: quote.customer_email.clone().unwrap_or_default(),
            customer_address: quote.customer_address.clone().unwrap_or_default(),
            vehicle_make: quote.vehicle_make.clone().unwrap_or_default(),
            vehicle_model: quote.vehicle_model.clone().unwrap_or_default(),
            vehicle_registration: quote.vehicle_registration.clone().unwrap_or_default(),
            line_items: quote.line_items.iter().map(LineItemForm::from_item).collect(),
            discount: quote.discount.to_string(),
            tax_rate: quote.tax_rate.to_string(),
            notes: quote.notes.clone(),
            status: quote.status,
            errors: Vec::new(),
        }
    }

    /// Parses the form into a [`Quotation`], collecting every problem into
    /// `self.errors`. Nothing invalid ever reaches the calculator or the
    /// store.
    pub fn validate(&mut self) -> Result<Quotation, ()> {
        let mut errors = Vec::new();

        let customer_name = required_text("Customer name", &self.customer_name, &mut errors);
        let date = parse_date("Date", &self.date, &mut errors);
        let discount = parse_amount("Discount", &self.discount, &mut errors);
        let tax_rate = parse_amount("Tax rate", &self.tax_rate, &mut errors);

        let rows: Vec<&LineItemForm> =
            self.line_items.iter().filter(|row| !row.is_blank()).collect();
        if rows.is_empty() {
            errors.push("At least one line item is required".to_string());
        }

        let mut items = Vec::new();
        for (idx, row) in rows.iter().enumerate() {
            let label = format!("Line {}", idx + 1);
            let description =
                required_text(&format!("{label} description"), &row.description, &mut errors);
            let quantity = parse_positive(&format!("{label} quantity"), &row.quantity, &mut errors);
            let unit_price =
                parse_amount(&format!("{label} unit price"), &row.unit_price, &mut errors);

            if let (Some(description), Some(quantity), Some(unit_price)) =
                (description, quantity, unit_price)
            {
                items.push(LineItem {
                    id: row.id.unwrap_or_else(Uuid::new_v4),
                    description,
                    quantity,
                    unit_price,
                });
            }
        }

        self.errors = errors;
        if !self.errors.is_empty() {
            return Err(());
        }

        Ok(Quotation {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            quote_number: self.quote_number.clone(),
            date: date.ok_or(())?,
            customer_name: customer_name.ok_or(())?,
            customer_phone: optional_text(&self.customer_phone),
            customer_email: optional_text(&self.customer_email),
            customer_address: optional_text(&self.customer_address),
            vehicle_make: optional_text(&self.vehicle_make),
            vehicle_model: optional_text(&self.vehicle_model),
            vehicle_registration: optional_text(&self.vehicle_registration),
            line_items: items,
            discount: discount.ok_or(())?,
            tax_rate: tax_rate.ok_or(())?,
            notes: self.notes.trim().to_string(),
            status: self.status,
        })
    }
}

fn required_text(
    field: &str,
    value: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(format!("{field} is required"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(
    field: &str,
    value: &str,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    match value.trim().parse() {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{field} must be a valid date (YYYY-MM-DD)"));
            None
        }
    }
}

/// Empty input counts as zero; anything else must parse and be non-negative.
fn parse_amount(
    field: &str,
    value: &str,
    errors: &mut Vec<String>,
) -> Option<Decimal> {
    match parse_decimal(value) {
        Ok(amount) if amount >= Decimal::ZERO => Some(amount),
        Ok(_) => {
            errors.push(format!("{field} cannot be negative"));
            None
        }
        Err(_) => {
            errors.push(format!("{field} must be a valid number"));
            None
        }
    }
}

fn parse_positive(
    field: &str,
    value: &str,
    errors: &mut Vec<String>,
) -> Option<Decimal> {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
        return None;
    }
    match parse_decimal(value) {
        Ok(amount) if amount > Decimal::ZERO => Some(amount),
        Ok(_) => {
            errors.push(format!("{field} must be greater than zero"));
            None
        }
        Err(_) => {
            errors.push(format!("{field} must be a valid number"));
            None
        }
    }
}
