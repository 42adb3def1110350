use anyhow::{Context, Result};

use super::super::{
    args::KeysCommand, context::CommandContext, exit_status::ExitStatus, report::print_key_table,
};
use crate::core::{FlatEntry, KeyPattern};

pub fn keys(ctx: &CommandContext, cmd: &KeysCommand) -> Result<ExitStatus> {
    let pattern = match cmd.pattern.as_deref() {
        Some(p) => Some(
            KeyPattern::new(p).with_context(|| format!("Invalid key pattern: \"{}\"", p))?,
        ),
        None => None,
    };
    let locale = cmd.locale.unwrap_or_else(|| ctx.stored_locale());
    let dictionary = ctx.load_dictionary(locale)?;

    let entries: Vec<FlatEntry> = dictionary
        .flatten()
        .into_iter()
        .filter(|entry| pattern.as_ref().is_none_or(|p| p.matches(&entry.key)))
        .collect();

    if entries.is_empty() {
        println!("No keys found in '{}'", locale);
    } else {
        print_key_table(&entries);
        println!();
        println!("{} key(s) in '{}'", entries.len(), locale);
    }

    Ok(ExitStatus::Success)
}
