use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, LOG_FILTERS};

fn project() -> Result<CliTest> {
    CliTest::with_locales(&[
        ("it", json!({"nav": {"home": "Home", "contact": "Contatti"}})),
        ("de", json!({"nav": {"home": "Startseite"}})),
    ])
}

fn stored(test: &CliTest) -> Result<Value> {
    Ok(serde_json::from_str(
        &test.read_file(".gardablick/preferences.json")?,
    )?)
}

#[test]
fn test_locale_show_defaults_to_fallback() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.locale_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current locale: it
    Cookie: locale=it; path=/; max-age=31536000
    Translations: 2 key(s) from ./locales/it.json

    ----- stderr -----
    ");

    // Initialisation writes the cookie but not the storage key.
    let prefs = stored(&test)?;
    assert_eq!(prefs["cookies"]["locale"], "locale=it; path=/; max-age=31536000");
    assert!(prefs["storage"].get("gardablick-locale").is_none());

    Ok(())
}

#[test]
fn test_locale_set_persists() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.locale_command().args(["set", "de"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Locale set to 'de'
    Cookie: locale=de; path=/; max-age=31536000
    Translations: 1 key(s) from ./locales/de.json

    ----- stderr -----
    ");

    let prefs = stored(&test)?;
    assert_eq!(prefs["storage"]["gardablick-locale"], "de");
    assert_eq!(prefs["cookies"]["locale"], "locale=de; path=/; max-age=31536000");

    assert_cmd_snapshot!(test.locale_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current locale: de
    Cookie: locale=de; path=/; max-age=31536000
    Translations: 1 key(s) from ./locales/de.json

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_locale_show_ignores_invalid_stored_value() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".gardablick/preferences.json",
        r#"{ "storage": { "gardablick-locale": "fr" }, "cookies": {} }"#,
    )?;

    assert_cmd_snapshot!(test.locale_command().arg("show"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Current locale: it
    Cookie: locale=it; path=/; max-age=31536000
    Translations: 2 key(s) from ./locales/it.json

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_locale_set_with_missing_dictionary_still_switches() -> Result<()> {
    let test = project()?;

    insta::with_settings!({ filters => LOG_FILTERS.to_vec() }, {
        assert_cmd_snapshot!(test.locale_command().args(["set", "en"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Locale set to 'en'
        Cookie: locale=en; path=/; max-age=31536000
        Translations: 0 key(s) from ./locales/en.json

        ----- stderr -----
        [WARN gardablick_i18n::core::controller] Using empty translations for 'en': failed to read ./locales/en.json: No such file or directory (os error 2)
        ");
    });
    assert_eq!(stored(&test)?["storage"]["gardablick-locale"], "en");

    Ok(())
}
