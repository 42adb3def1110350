use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::CommonArgs,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, SUCCESS_MARK},
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(common: &CommonArgs) -> Result<ExitStatus> {
    let config_path = common.root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} already exists", CONFIG_FILE_NAME).red()
        );
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
