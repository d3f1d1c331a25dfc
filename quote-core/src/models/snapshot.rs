use serde::{Deserialize, Serialize};

use super::{CompanyDetails, Quotation};

/// Payload of a backup file: both persisted records in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    #[serde(default)]
    pub quotes: Vec<Quotation>,
    #[serde(default)]
    pub company: CompanyDetails,
}
