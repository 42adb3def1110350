use std::process::ExitCode;

use clap::Parser;
use gardablick_i18n::cli::{Arguments, ExitStatus, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.common.verbose);

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Library diagnostics go to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,gardablick_i18n=debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}
