//! Command-line layer: argument parsing, dispatch and terminal output.

use anyhow::Result;

mod args;
mod commands;
mod context;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, ConsentAction, LocaleAction};
pub use context::CommandContext;
pub use exit_status::ExitStatus;

use commands::{
    consent::consent, init::init, keys::keys, locale::locale, render::render, resolve::resolve,
};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { common, command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };
    let Some(command) = command else {
        return Ok(ExitStatus::Success);
    };

    let ctx = || CommandContext::new(&common);
    match &command {
        Command::Init => init(&common),
        Command::Resolve(cmd) => resolve(&ctx()?, cmd),
        Command::Keys(cmd) => keys(&ctx()?, cmd),
        Command::Render(cmd) => render(&ctx()?, cmd),
        Command::Locale { action } => locale(&ctx()?, action),
        Command::Consent { action } => consent(&ctx()?, action),
    }
}
