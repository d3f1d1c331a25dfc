pub mod app;
pub mod attach;
pub mod forms;
pub mod logging;
pub mod preview;
pub mod screens;
pub mod share;
pub mod utils;

pub use app::{MessageType, QuoteApp, Screen};
