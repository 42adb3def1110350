use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::LocaleAction,
    context::{CommandContext, block_on},
    exit_status::ExitStatus,
    report::SUCCESS_MARK,
};
use crate::core::persist::LocaleCookie;

pub fn locale(ctx: &CommandContext, action: &LocaleAction) -> Result<ExitStatus> {
    let mut controller = ctx.controller()?;
    let source = ctx.source()?;

    block_on(async {
        let ticket = match action {
            LocaleAction::Show => controller.init_locale(),
            LocaleAction::Set { locale } => controller.set_locale(*locale),
        };
        let result = controller.fetch(ticket).await;
        controller.complete(ticket, result)
    })?;

    let current = controller.current();
    if let LocaleAction::Set { .. } = action {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Locale set to '{}'", current).green()
        );
    } else {
        println!("Current locale: {}", current.code().bold());
    }
    println!("Cookie: {}", LocaleCookie::new(current));
    println!(
        "Translations: {} key(s) from {}",
        controller.dictionary().len(),
        source.describe(current)
    );

    Ok(ExitStatus::Success)
}
