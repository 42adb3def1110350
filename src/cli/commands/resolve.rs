use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::ResolveCommand,
    context::CommandContext,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, SUCCESS_MARK},
};

pub fn resolve(ctx: &CommandContext, cmd: &ResolveCommand) -> Result<ExitStatus> {
    let locale = cmd.locale.unwrap_or_else(|| ctx.stored_locale());
    let dictionary = ctx.load_dictionary(locale)?;

    let mut missing = 0;
    for key in &cmd.keys {
        match dictionary.lookup(key) {
            Some(value) => println!("{} = {}", key.cyan(), value),
            None => {
                missing += 1;
                println!("{} = {} {}", key.cyan(), key, "(missing)".yellow());
            }
        }
    }

    println!();
    if missing == 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} key(s) resolved in '{}'", cmd.keys.len(), locale).green()
        );
        Ok(ExitStatus::Success)
    } else {
        println!(
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} of {} key(s) missing in '{}'",
                missing,
                cmd.keys.len(),
                locale
            )
            .red()
        );
        Ok(ExitStatus::Failure)
    }
}
