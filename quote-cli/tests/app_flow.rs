//! Integration tests for the quotation lifecycle using the actual file
//! store backend.

use std::path::Path;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use quote_cli::forms::LineItemForm;
use quote_cli::{QuoteApp, Screen, preview};
use quote_core::calculations::QuoteTotals;
use quote_store::{StoreConfig, open_store};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 22).expect("valid date")
}

/// Opens the app over a file store rooted at `dir`, the way `main` does.
fn open_app(dir: &Path) -> QuoteApp {
    let store = open_store(&StoreConfig {
        backend: "file".to_string(),
        data_dir: dir.to_path_buf(),
    })
    .expect("Failed to open file store");
    QuoteApp::open(store, dir.join("previews"))
}

/// Drafts and saves one four-tyre quotation for `customer`.
fn save_basic_quote(app: &mut QuoteApp, customer: &str) {
    app.start_new_quote(today());
    let form = app.form.as_mut().expect("Editing should hold a draft");
    form.customer_name = customer.to_string();
    form.vehicle_registration = "KA01AB1234".to_string();
    form.line_items = vec![LineItemForm {
        id: None,
        description: "MRF ZLX 185/65 R15".to_string(),
        quantity: "4".to_string(),
        unit_price: "2500".to_string(),
    }];
    assert!(app.save_draft(), "Failed to save the draft");
}

#[test]
fn test_quote_survives_reopen() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    save_basic_quote(&mut app, "Ramesh Kumar");
    drop(app);

    let reopened = open_app(tmp.path());
    assert_eq!(reopened.quotes.len(), 1);
    let quote = &reopened.quotes[0];
    assert_eq!(quote.quote_number, "QT-220825-0001");
    assert_eq!(quote.customer_name, "Ramesh Kumar");
    assert_eq!(quote.tax_rate, dec!(18));

    let totals = QuoteTotals::for_quote(quote);
    assert_eq!(totals.gross_total, dec!(10000));
    assert_eq!(totals.subtotal, dec!(8474.58));
    assert_eq!(totals.total_tax, dec!(1525.42));
    assert_eq!(totals.grand_total, dec!(10000));
}

#[test]
fn test_numbering_continues_after_reopen() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    save_basic_quote(&mut app, "First");
    drop(app);

    let mut reopened = open_app(tmp.path());
    reopened.start_new_quote(today());
    let form = reopened.form.as_ref().expect("Editing should hold a draft");
    assert_eq!(form.quote_number, "QT-220825-0002");
}

#[test]
fn test_edit_updates_in_place() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    save_basic_quote(&mut app, "Ramesh Kumar");
    let id = app.quotes[0].id;

    assert!(app.edit_quote(id));
    let form = app.form.as_mut().expect("Editing should hold the draft");
    form.line_items[0].quantity = "2".to_string();
    assert!(app.save_draft());

    let reopened = open_app(tmp.path());
    assert_eq!(reopened.quotes.len(), 1, "edit must not duplicate");
    let quote = &reopened.quotes[0];
    assert_eq!(quote.id, id);
    assert_eq!(quote.quote_number, "QT-220825-0001");
    assert_eq!(quote.line_items[0].quantity, dec!(2));
}

#[test]
fn test_delete_is_persisted() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    save_basic_quote(&mut app, "Ramesh Kumar");
    let id = app.quotes[0].id;
    assert!(app.delete_quote(id));
    drop(app);

    let reopened = open_app(tmp.path());
    assert!(reopened.quotes.is_empty());
}

#[test]
fn test_password_gate_round_trip() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    assert_eq!(app.current_screen, Screen::Listing, "no password, no lock");
    app.company.password = Some("wheels".to_string());
    assert!(app.save_company());
    drop(app);

    let mut reopened = open_app(tmp.path());
    assert_eq!(reopened.current_screen, Screen::Lock);
    assert!(!reopened.unlock("spanner"));
    assert_eq!(reopened.current_screen, Screen::Lock);
    assert!(reopened.unlock("wheels"));
    assert_eq!(reopened.current_screen, Screen::Listing);
}

#[test]
fn test_backup_restores_into_fresh_store() {
    let source_dir = tempfile::tempdir().expect("Failed to create tempdir");
    let target_dir = tempfile::tempdir().expect("Failed to create tempdir");
    let backup_file = source_dir.path().join("backup.json");

    let mut source = open_app(source_dir.path());
    save_basic_quote(&mut source, "Ramesh Kumar");
    source.company.name = "Sharma Tyres".to_string();
    assert!(source.save_company());
    source.backup_to(&backup_file).expect("Failed to write backup");

    let mut target = open_app(target_dir.path());
    let restored = target
        .restore_from(&backup_file)
        .expect("Failed to restore backup");
    assert_eq!(restored, 1);
    assert_eq!(target.quotes[0].customer_name, "Ramesh Kumar");
    assert_eq!(target.company.name, "Sharma Tyres");

    // The restore went through to the target's own files.
    drop(target);
    let reopened = open_app(target_dir.path());
    assert_eq!(reopened.quotes.len(), 1);
    assert_eq!(reopened.company.name, "Sharma Tyres");
}

#[test]
fn test_preview_file_is_written() {
    let tmp = tempfile::tempdir().expect("Failed to create tempdir");

    let mut app = open_app(tmp.path());
    save_basic_quote(&mut app, "Ramesh Kumar");
    let quote = &app.quotes[0];

    let path = preview::write_preview(&app.preview_dir, quote, &app.company, false)
        .expect("Failed to render the preview");
    assert_eq!(path, app.preview_dir.join("QT-220825-0001.html"));

    let html = std::fs::read_to_string(&path).expect("Failed to read the preview");
    assert!(html.contains("QT-220825-0001"));
    assert!(html.contains("Ramesh Kumar"));
    assert!(!html.contains("window.print"));

    let printable = preview::write_preview(&app.preview_dir, quote, &app.company, true)
        .expect("Failed to render the print view");
    let html = std::fs::read_to_string(&printable).expect("Failed to read the print view");
    assert!(html.contains("window.print"));
}
