use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, LOG_FILTERS};

const INDEX: &str = r#"<html lang="it"><body><h1 data-i18n="hero.title">hero.title</h1><input data-i18n-placeholder="form.email" placeholder="form.email"></body></html>"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_locales(&[
        (
            "it",
            json!({"hero": {"title": "Benvenuti"}, "form": {"email": "La tua email"}}),
        ),
        (
            "en",
            json!({"hero": {"title": "Welcome"}, "form": {"email": "Your email"}}),
        ),
        ("de", json!({"hero": {"title": "Willkommen"}})),
    ])?;
    test.write_file("templates/index.html", INDEX)?;
    Ok(test)
}

#[test]
fn test_render_dry_run_writes_nothing() -> Result<()> {
    let test = project()?;

    let mut cmd = test.render_command();
    cmd.args(["--locale", "en", "--locale", "it"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ en: 1 template(s), 2 node(s) translated
    ✓ it: 1 template(s), 2 node(s) translated

    Dry run: use --apply to write files to ./dist

    ----- stderr -----
    ");
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_render_apply_writes_each_locale() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.render_command().args(["--locale", "en", "--apply"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ en: 1 template(s), 2 node(s) translated

    Wrote 1 file(s) to ./dist

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("dist/en/templates/index.html")?,
        r#"<html lang="en"><body><h1 data-i18n="hero.title">Welcome</h1><input data-i18n-placeholder="form.email" placeholder="Your email"></body></html>"#
    );
    assert_eq!(test.read_file("templates/index.html")?, INDEX);

    Ok(())
}

#[test]
fn test_render_reports_untranslated_keys() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.render_command().args(["--locale", "de", "--apply"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✓ de: 1 template(s), 1 node(s) translated
    ⚠ de: 1 untranslated key(s): form.email

    Wrote 1 file(s) to ./dist

    ----- stderr -----
    ");

    // Untranslated nodes keep their original content.
    let rendered = test.read_file("dist/de/templates/index.html")?;
    assert!(rendered.contains(r#"<h1 data-i18n="hero.title">Willkommen</h1>"#));
    assert!(rendered.contains(r#"placeholder="form.email""#));

    Ok(())
}

#[test]
fn test_render_counts_only_visible_nodes() -> Result<()> {
    let test = project()?;
    test.write_file(
        "templates/index.html",
        r#"<div data-i18n="hero.title"><input data-i18n-placeholder="form.email"></div>"#,
    )?;

    assert_cmd_snapshot!(test.render_command().args(["--locale", "it"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ it: 1 template(s), 1 node(s) translated

    Dry run: use --apply to write files to ./dist

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_render_ignores_patterns() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".gardablickrc.json",
        r#"{ "localesRoot": "./locales", "ignores": ["**/drafts/**"] }"#,
    )?;
    test.write_file("templates/drafts/wip.html", r#"<p data-i18n="wip">wip</p>"#)?;

    assert_cmd_snapshot!(test.render_command().args(["--locale", "it"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ it: 1 template(s), 2 node(s) translated

    Dry run: use --apply to write files to ./dist

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_render_without_templates() -> Result<()> {
    let test = CliTest::with_locales(&[("it", json!({}))])?;

    insta::with_settings!({ filters => LOG_FILTERS.to_vec() }, {
        assert_cmd_snapshot!(test.render_command(), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        No templates found under: templates

        ----- stderr -----
        [WARN gardablick_i18n::markup::templates] Include path does not exist: ./templates
        ");
    });

    Ok(())
}
