//! Record layer over the key-value store.
//!
//! Two records exist: the quotation collection under [`QUOTES_KEY`] and the
//! company profile under [`COMPANY_KEY`]. Reads fail open: a missing or
//! corrupt record is logged and replaced with an empty collection or the
//! default profile, so bad data never locks the operator out of the app.
//! Writes propagate their errors and the caller decides how loudly to
//! complain.

use tracing::warn;

use super::kv::{KeyValueStore, StoreError};
use crate::models::{BackupSnapshot, CompanyDetails, Quotation};

/// Key holding the serialized quotation collection.
pub const QUOTES_KEY: &str = "tyreQuotes";

/// Key holding the serialized company profile.
pub const COMPANY_KEY: &str = "companyDetails";

pub struct QuoteStore {
    backend: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Loads every saved quotation.
    /// A missing, unreadable, or corrupt record yields an empty collection.
    pub fn load_quotes(&self) -> Vec<Quotation> {
        match self.backend.get(QUOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(quotes) => quotes,
                Err(e) => {
                    warn!("discarding corrupt quotation record: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read quotations: {e}");
                Vec::new()
            }
        }
    }

    /// Writes the whole collection back. Last write wins.
    pub fn save_quotes(
        &self,
        quotes: &[Quotation],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(quotes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.backend.set(QUOTES_KEY, &raw)
    }

    /// Loads the company profile.
    /// Fields absent from the stored record come back as defaults; a
    /// missing or corrupt record yields the full default profile.
    pub fn load_company(&self) -> CompanyDetails {
        match self.backend.get(COMPANY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(company) => company,
                Err(e) => {
                    warn!("discarding corrupt company record: {e}");
                    CompanyDetails::default()
                }
            },
            Ok(None) => CompanyDetails::default(),
            Err(e) => {
                warn!("could not read company details: {e}");
                CompanyDetails::default()
            }
        }
    }

    pub fn save_company(
        &self,
        company: &CompanyDetails,
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(company).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.backend.set(COMPANY_KEY, &raw)
    }

    /// Serializes both records into one backup document.
    pub fn export_backup(&self) -> Result<String, StoreError> {
        let snapshot = BackupSnapshot {
            quotes: self.load_quotes(),
            company: self.load_company(),
        };
        serde_json::to_string_pretty(&snapshot).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Replaces both records with the contents of a backup document and
    /// returns how many quotations were restored.
    ///
    /// The document is parsed in full before anything is written, so a
    /// corrupt backup leaves the store untouched.
    pub fn import_backup(
        &self,
        raw: &str,
    ) -> Result<usize, StoreError> {
        let snapshot: BackupSnapshot =
            serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.save_quotes(&snapshot.quotes)?;
        self.save_company(&snapshot.company)?;
        Ok(snapshot.quotes.len())
    }
}
