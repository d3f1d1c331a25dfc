//! Password prompt shown before anything else when a password is set.

use anyhow::Result;
use inquire::Password;

use super::Flow;
use crate::app::QuoteApp;

pub(super) fn show(app: &mut QuoteApp) -> Result<Flow> {
    let name = app.company.name.trim();
    if name.is_empty() {
        println!("Locked");
    } else {
        println!("{name} (locked)");
    }

    match Password::new("Password:")
        .without_confirmation()
        .prompt_skippable()?
    {
        Some(input) => {
            app.unlock(&input);
            Ok(Flow::Continue)
        }
        None => Ok(Flow::Quit),
    }
}
