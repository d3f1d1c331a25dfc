mod company;
mod line_item;
mod quotation;
mod snapshot;
mod status;

pub use company::CompanyDetails;
pub use line_item::LineItem;
pub use quotation::{Quotation, remove_quote, upsert_quote};
pub use snapshot::BackupSnapshot;
pub use status::QuoteStatus;
