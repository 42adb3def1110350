use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::ConsentAction,
    context::CommandContext,
    exit_status::ExitStatus,
    report::{SUCCESS_MARK, print_consent},
};
use crate::core::consent::{CookiePreferences, load_consent, needs_prompt, save_consent};

pub fn consent(ctx: &CommandContext, action: &ConsentAction) -> Result<ExitStatus> {
    let mut store = ctx.store();
    let key = &ctx.config.consent_key;

    let prefs = match action {
        ConsentAction::Show => {
            if needs_prompt(&store, key) {
                println!("No cookie consent recorded; the consent prompt will be shown.");
                return Ok(ExitStatus::Success);
            }
            match load_consent(&store, key) {
                Some(prefs) => print_consent(&prefs),
                None => println!("Cookie consent recorded, but the stored value is unreadable."),
            }
            return Ok(ExitStatus::Success);
        }
        ConsentAction::AcceptAll => CookiePreferences::accept_all(),
        ConsentAction::Reject => CookiePreferences::reject_all(),
        ConsentAction::Accept { categories } => CookiePreferences::with_categories(categories),
    };

    save_consent(&mut store, key, &prefs)
        .with_context(|| format!("Failed to save consent to {}", store.path().display()))?;

    println!("{} {}", SUCCESS_MARK.green(), "Cookie preferences saved".green());
    print_consent(&prefs.selected());

    Ok(ExitStatus::Success)
}
