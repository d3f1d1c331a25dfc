//! Application state and transitions.
//!
//! [`QuoteApp`] owns the loaded collection, the company profile, the session
//! gate, and the draft being edited. The screens only render and prompt; every
//! state change goes through a method here so the flows stay testable without
//! a terminal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, error, info};
use uuid::Uuid;

use quote_core::auth::{AuthError, SessionGate};
use quote_core::models::{CompanyDetails, Quotation, remove_quote, upsert_quote};
use quote_core::numbering::next_quote_number;
use quote_core::store::{KeyValueStore, QuoteStore};

use crate::attach::{AttachOutcome, AttachTask, pick_qr_image};
use crate::forms::QuoteForm;

/// Which screen is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    Lock,
    #[default]
    Listing,
    Editing,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// Main application state.
pub struct QuoteApp {
    store: QuoteStore,
    pub quotes: Vec<Quotation>,
    pub company: CompanyDetails,
    pub gate: SessionGate,
    pub current_screen: Screen,
    /// The draft under edit; `None` outside the editing screen.
    pub form: Option<QuoteForm>,
    pub search: String,
    pub status_message: Option<(String, MessageType)>,
    /// Where rendered previews are written.
    pub preview_dir: PathBuf,
    /// Bumped on every draft or settings transition; completions carrying an
    /// older value are stale and must not be applied.
    draft_generation: u64,
    pending_attach: Option<AttachTask>,
}

impl QuoteApp {
    /// Loads saved state and decides the opening screen.
    ///
    /// Loading never fails: missing or corrupt records fall back to an empty
    /// collection and the default profile.
    pub fn open(
        backend: Box<dyn KeyValueStore>,
        preview_dir: PathBuf,
    ) -> Self {
        let store = QuoteStore::new(backend);
        let quotes = store.load_quotes();
        let company = store.load_company();
        let gate = SessionGate::new(company.password.clone());
        let current_screen = if gate.is_unlocked() {
            Screen::Listing
        } else {
            Screen::Lock
        };
        info!(quotes = quotes.len(), locked = !gate.is_unlocked(), "session opened");

        Self {
            store,
            quotes,
            company,
            gate,
            current_screen,
            form: None,
            search: String::new(),
            status_message: None,
            preview_dir,
            draft_generation: 0,
            pending_attach: None,
        }
    }

    pub fn show_message(
        &mut self,
        msg: impl Into<String>,
        msg_type: MessageType,
    ) {
        self.status_message = Some((msg.into(), msg_type));
    }

    pub fn clear_message(&mut self) {
        self.status_message = None;
    }

    // ── session ──────────────────────────────────────────────────────────

    pub fn unlock(
        &mut self,
        input: &str,
    ) -> bool {
        match self.gate.unlock(input) {
            Ok(()) => {
                self.current_screen = Screen::Listing;
                true
            }
            Err(AuthError::IncorrectPassword) => {
                self.show_message("Incorrect password", MessageType::Error);
                false
            }
        }
    }

    /// Operator logout. A no-op when no password is configured.
    pub fn lock(&mut self) {
        if !self.gate.requires_password() {
            return;
        }
        self.gate.lock();
        self.form = None;
        self.bump_generation();
        self.current_screen = Screen::Lock;
    }

    // ── drafts ───────────────────────────────────────────────────────────

    /// Starts a fresh draft: new quote number, today's date, company
    /// defaults. The number is generated here and never again for this
    /// quotation.
    pub fn start_new_quote(
        &mut self,
        today: NaiveDate,
    ) {
        let number = next_quote_number(&self.quotes, today);
        self.form = Some(QuoteForm::new_draft(
            number,
            today,
            self.company.default_tax_rate,
            self.company.default_notes.clone(),
        ));
        self.bump_generation();
        self.current_screen = Screen::Editing;
    }

    /// Reopens a saved quotation for editing. Keeps its number.
    pub fn edit_quote(
        &mut self,
        id: Uuid,
    ) -> bool {
        match self.quotes.iter().find(|q| q.id == id) {
            Some(quote) => {
                self.form = Some(QuoteForm::from_quote(quote));
                self.bump_generation();
                self.current_screen = Screen::Editing;
                true
            }
            None => {
                self.show_message("Quotation not found", MessageType::Error);
                false
            }
        }
    }

    /// Validates the draft and persists the whole collection.
    ///
    /// On validation failure the draft stays open with its errors filled in
    /// and nothing is written.
    pub fn save_draft(&mut self) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        match form.validate() {
            Ok(quote) => {
                let number = quote.quote_number.clone();
                upsert_quote(&mut self.quotes, quote);
                if self.persist_quotes() {
                    self.show_message(format!("Saved {number}"), MessageType::Success);
                }
                self.form = None;
                self.bump_generation();
                self.current_screen = Screen::Listing;
                true
            }
            Err(()) => {
                self.show_message("Please fix validation errors", MessageType::Error);
                false
            }
        }
    }

    /// Discards the draft without side effects.
    pub fn cancel_draft(&mut self) {
        self.form = None;
        self.bump_generation();
        self.current_screen = Screen::Listing;
    }

    // ── collection ───────────────────────────────────────────────────────

    pub fn quote(
        &self,
        id: Uuid,
    ) -> Option<&Quotation> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// The quotations to list: filtered by the current search, newest first.
    pub fn visible_quotes(&self) -> Vec<&Quotation> {
        let needle = self.search.trim();
        let mut rows: Vec<&Quotation> = self
            .quotes
            .iter()
            .filter(|q| needle.is_empty() || q.matches(needle))
            .collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.quote_number.cmp(&a.quote_number))
        });
        rows
    }

    pub fn delete_quote(
        &mut self,
        id: Uuid,
    ) -> bool {
        if !remove_quote(&mut self.quotes, id) {
            return false;
        }
        if self.persist_quotes() {
            self.show_message("Quotation deleted", MessageType::Info);
        }
        true
    }

    /// Writes the in-memory collection through to the store. A failed write
    /// is logged and surfaced but the in-memory state is kept as-is.
    fn persist_quotes(&mut self) -> bool {
        match self.store.save_quotes(&self.quotes) {
            Ok(()) => true,
            Err(e) => {
                error!("could not save quotations: {e}");
                self.show_message(format!("Could not save quotations: {e}"), MessageType::Error);
                false
            }
        }
    }

    // ── settings ─────────────────────────────────────────────────────────

    pub fn open_settings(&mut self) {
        self.bump_generation();
        self.current_screen = Screen::Settings;
    }

    pub fn close_settings(&mut self) {
        self.bump_generation();
        self.current_screen = Screen::Listing;
    }

    /// Persists the company profile as it currently stands in memory.
    ///
    /// A changed password is written too, but the live gate is left alone:
    /// it applies from the next session.
    pub fn save_company(&mut self) -> bool {
        match self.store.save_company(&self.company) {
            Ok(()) => {
                self.show_message("Company details saved", MessageType::Success);
                true
            }
            Err(e) => {
                error!("could not save company details: {e}");
                self.show_message(
                    format!("Could not save company details: {e}"),
                    MessageType::Error,
                );
                false
            }
        }
    }

    /// Throws away unsaved profile edits by reloading the stored record.
    pub fn discard_company_edits(&mut self) {
        self.company = self.store.load_company();
    }

    // ── payment QR attach ────────────────────────────────────────────────

    pub fn generation(&self) -> u64 {
        self.draft_generation
    }

    /// Launches the image picker in the background.
    pub fn start_qr_pick(&mut self) {
        self.pending_attach = Some(pick_qr_image(self.draft_generation));
    }

    /// Applies a finished pick, if any. Call once per loop iteration.
    pub fn poll_attach(&mut self) {
        let Some(task) = &self.pending_attach else {
            return;
        };
        let Some(outcome) = task.try_take() else {
            return;
        };
        let generation = task.generation();
        self.pending_attach = None;
        self.apply_attach(generation, outcome);
    }

    /// Applies a pick outcome tagged with the generation it was launched
    /// under. Stale completions are dropped: the operator has moved on and
    /// the image must not land in whatever they are editing now.
    pub fn apply_attach(
        &mut self,
        generation: u64,
        outcome: AttachOutcome,
    ) {
        if generation != self.draft_generation {
            debug!(generation, current = self.draft_generation, "dropping stale QR pick");
            return;
        }
        match outcome {
            AttachOutcome::Picked(data_uri) => {
                self.company.payment_qr = Some(data_uri);
                self.show_message(
                    "Payment QR attached; save settings to keep it",
                    MessageType::Success,
                );
            }
            AttachOutcome::Cancelled => {
                self.show_message("QR selection cancelled", MessageType::Info);
            }
            AttachOutcome::Failed(reason) => {
                self.show_message(
                    format!("Could not read QR image: {reason}"),
                    MessageType::Error,
                );
            }
        }
    }

    // ── backup / restore ─────────────────────────────────────────────────

    /// Writes a snapshot of both records to `path`.
    pub fn backup_to(
        &self,
        path: &Path,
    ) -> anyhow::Result<()> {
        let payload = self.store.export_backup()?;
        fs::write(path, payload)
            .with_context(|| format!("writing backup to {}", path.display()))?;
        info!(path = %path.display(), "backup written");
        Ok(())
    }

    /// Replaces both records with a snapshot and reloads in-memory state.
    /// Returns the number of quotations restored. A snapshot that does not
    /// parse leaves everything untouched.
    pub fn restore_from(
        &mut self,
        path: &Path,
    ) -> anyhow::Result<usize> {
        let payload = fs::read_to_string(path)
            .with_context(|| format!("reading backup from {}", path.display()))?;
        let restored = self.store.import_backup(&payload)?;
        self.quotes = self.store.load_quotes();
        self.company = self.store.load_company();
        info!(restored, "backup imported");
        Ok(restored)
    }

    fn bump_generation(&mut self) {
        self.draft_generation += 1;
        self.pending_attach = None;
    }
}
