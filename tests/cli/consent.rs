use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

fn stored_consent(test: &CliTest) -> Result<Value> {
    let prefs: Value = serde_json::from_str(&test.read_file(".gardablick/preferences.json")?)?;
    let raw = prefs["storage"]["gardablick-cookie-consent"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    Ok(serde_json::from_str(&raw)?)
}

#[test]
fn test_consent_show_without_answer() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.consent_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No cookie consent recorded; the consent prompt will be shown.

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_consent_accept_all() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.consent_command().arg("accept-all"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Cookie preferences saved
    necessary    on
    preferences  on
    statistics   on
    marketing    on

    ----- stderr -----
    ");

    let consent = stored_consent(&test)?;
    assert_eq!(consent["marketing"], true);

    Ok(())
}

#[test]
fn test_consent_selected_categories_keep_necessary() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .consent_command()
        .args(["accept", "--category", "statistics"])
        .output()?;
    assert!(output.status.success());

    let consent = stored_consent(&test)?;
    assert_eq!(consent["necessary"], true);
    assert_eq!(consent["preferences"], false);
    assert_eq!(consent["statistics"], true);
    assert_eq!(consent["marketing"], false);

    assert_cmd_snapshot!(test.consent_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    necessary    on
    preferences  off
    statistics   on
    marketing    off

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_consent_reject_replaces_previous_answer() -> Result<()> {
    let test = CliTest::new()?;
    test.consent_command().arg("accept-all").output()?;

    assert_cmd_snapshot!(test.consent_command().arg("reject"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Cookie preferences saved
    necessary    on
    preferences  off
    statistics   off
    marketing    off

    ----- stderr -----
    ");

    let consent = stored_consent(&test)?;
    assert_eq!(consent["necessary"], true);
    assert_eq!(consent["statistics"], false);
    assert_eq!(consent["marketing"], false);

    Ok(())
}

#[test]
fn test_consent_show_unreadable_value() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".gardablick/preferences.json",
        r#"{ "storage": { "gardablick-cookie-consent": "{oops" }, "cookies": {} }"#,
    )?;

    assert_cmd_snapshot!(test.consent_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Cookie consent recorded, but the stored value is unreadable.

    ----- stderr -----
    ");

    Ok(())
}
