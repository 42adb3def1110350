use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .gardablickrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".gardablickrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["apiBase"], "http://localhost:8000/api");
    assert_eq!(parsed["fallbackLocale"], "it");
    assert_eq!(parsed["textAttribute"], "data-i18n");
    assert_eq!(parsed["placeholderAttribute"], "data-i18n-placeholder");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".gardablickrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ .gardablickrc.json already exists
    ");
    assert_eq!(test.read_file(".gardablickrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_respects_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("site/.keep", "")?;

    let output = test.command().args(["init", "--root", "site"]).output()?;
    assert!(output.status.success());
    assert!(test.root().join("site/.gardablickrc.json").exists());

    Ok(())
}
