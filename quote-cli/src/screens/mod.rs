//! Interactive terminal screens.
//!
//! Each screen renders the current state, takes one action from the
//! operator, applies it through [`QuoteApp`], and returns. The loop in
//! [`run`] owns nothing beyond the ordering of those calls, so every
//! pass re-renders from scratch and picks up whatever the action
//! changed.

mod editing;
mod listing;
mod lock;
mod settings;

use anyhow::Result;

use crate::app::{MessageType, QuoteApp, Screen};

/// Whether the screen loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives the screen loop until the operator quits.
pub fn run(app: &mut QuoteApp) -> Result<()> {
    loop {
        app.poll_attach();
        flush_message(app);
        let flow = match app.current_screen {
            Screen::Lock => lock::show(app)?,
            Screen::Listing => listing::show(app)?,
            Screen::Editing => editing::show(app)?,
            Screen::Settings => settings::show(app)?,
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

/// Prints and consumes the pending status message, if any.
fn flush_message(app: &mut QuoteApp) {
    let Some((text, kind)) = app.status_message.take() else {
        return;
    };
    match kind {
        MessageType::Info => println!("{text}"),
        MessageType::Success => println!("✔ {text}"),
        MessageType::Error => eprintln!("✖ {text}"),
    }
}
