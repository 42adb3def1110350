use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::json;

use crate::CliTest;

fn project() -> Result<CliTest> {
    CliTest::with_locales(&[(
        "de",
        json!({
            "nav": {"home": "Startseite", "contact": "Kontakt"},
            "cookie": {"title": "Cookies", "accept": "Akzeptieren"},
            "faq": [{"q": "Warum?"}]
        }),
    )])
}

#[test]
fn test_keys_lists_all_in_order() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.keys_command().args(["--locale", "de"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    nav.home       Startseite
    nav.contact    Kontakt
    cookie.title   Cookies
    cookie.accept  Akzeptieren
    faq.0.q        Warum?

    5 key(s) in 'de'

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_keys_pattern_filter() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.keys_command().args(["cookie.*", "--locale", "de"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    cookie.title   Cookies
    cookie.accept  Akzeptieren

    2 key(s) in 'de'

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_keys_invalid_pattern() -> Result<()> {
    let test = project()?;

    let output = test.keys_command().args(["cookie.[", "--locale", "de"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid key pattern: \"cookie.[\""));

    Ok(())
}

#[test]
fn test_keys_empty_dictionary() -> Result<()> {
    let test = project()?;
    test.write_file("locales/it.json", "{}")?;

    assert_cmd_snapshot!(test.keys_command().args(["--locale", "it"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No keys found in 'it'

    ----- stderr -----
    ");

    Ok(())
}
