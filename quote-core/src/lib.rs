pub mod auth;
pub mod calculations;
pub mod models;
pub mod numbering;
pub mod store;

pub use auth::{AuthError, SessionGate, SessionState};
pub use models::*;
pub use store::{KeyValueStore, QuoteStore, StoreError};
