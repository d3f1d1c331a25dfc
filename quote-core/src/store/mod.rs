pub mod kv;
pub mod records;

pub use kv::{KeyValueStore, StoreError, check_key};
pub use records::{COMPANY_KEY, QUOTES_KEY, QuoteStore};
