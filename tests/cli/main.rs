use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use insta_cmd::{assert_cmd_snapshot, get_cargo_bin};
use serde_json::Value;
use tempfile::TempDir;

mod consent;
mod init;
mod keys;
mod locale;
mod render;

const BIN_NAME: &str = "gardablick-i18n";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keep config discovery from walking above the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project reading dictionaries from `locales/{locale}.json`.
    pub fn with_locales(locales: &[(&str, Value)]) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".gardablickrc.json", r#"{ "localesRoot": "./locales" }"#)?;
        for (locale, content) in locales {
            test.write_file(
                &format!("locales/{}.json", locale),
                &serde_json::to_string_pretty(content)?,
            )?;
        }
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn resolve_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("resolve");
        cmd
    }

    pub fn keys_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("keys");
        cmd
    }

    pub fn render_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("render");
        cmd
    }

    pub fn locale_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("locale");
        cmd
    }

    pub fn consent_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("consent");
        cmd
    }
}

/// env_logger prefixes each line with a timestamp and a padded level.
pub const LOG_FILTERS: &[(&str, &str)] = &[(
    r"\[\d{4}-\d{2}-\d{2}T[\d:.]+Z\s+(\w+)\s+([\w:]+)\]",
    "[$1 $2]",
)];

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".gardablickrc.json", r#"{ "apiBase": "not a url" }"#)?;

    assert_cmd_snapshot!(test.resolve_command().arg("nav.home"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid URL in 'apiBase': "not a url": relative URL without a base
    "#);
    Ok(())
}
