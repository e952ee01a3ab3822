use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, attr, element, first_child_chars, stderr, stdout, text};

fn button_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_document(
        "ast/button.ast.json",
        "app/components/button.hbs",
        vec![element(
            "button",
            vec![attr("title", text("Save it", 1, 16))],
            vec![text("\n  Save\n", 2, 3)],
        )],
    )?;
    Ok(test)
}

#[test]
fn test_fix_dry_run_previews_without_writing() -> Result<()> {
    let test = button_project()?;
    test.write_file("translations/en.json", "{}\n")?;
    let before = test.read_file("ast/button.ast.json")?;

    let output = test.fix_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains(
        "  --> app/components/button.hbs:2:3\n     |\n     - \"Save\"\n     + {{t \"components.button.Save\"}}\n"
    ));
    // Attribute values cannot be rewritten.
    assert!(out.contains("Non-translated string used in `title` attribute"));
    assert!(out.contains("Would replace 1 string(s) in 1 file(s)."));
    assert!(out.contains("Run with --apply to apply these changes."));

    assert_eq!(test.read_file("ast/button.ast.json")?, before);
    assert_eq!(test.read_file("translations/en.json")?, "{}\n");
    Ok(())
}

#[test]
fn test_fix_apply_rewrites_and_records_keys() -> Result<()> {
    let test = button_project()?;
    test.write_file("translations/en.json", "{}\n")?;

    let output = test.fix_command().arg("--apply").output()?;
    let out = stdout(&output);

    // The attribute value is still left to translate by hand.
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(out.contains("Replaced 1 string(s) in 1 file(s), catalog: translations/en.json"));
    assert!(out.contains("app/components/button.hbs:1:16"));

    let document = test.read_json("ast/button.ast.json")?;
    assert_eq!(
        first_child_chars(&document),
        Some(r#"{{t "components.button.Save"}}"#)
    );
    assert_eq!(
        document["template"]["body"][0]["attributes"][0]["value"]["chars"],
        json!("Save it")
    );

    let catalog = test.read_file("translations/en.json")?;
    assert!(catalog.ends_with("}\n"));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&catalog)?,
        json!({ "components": { "button": { "Save": "Save" } } })
    );
    Ok(())
}

#[test]
fn test_fix_apply_clean_template_succeeds() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("translations/en.json", "{}\n")?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text("Welcome", 1, 1), text("Next", 2, 1)],
    )?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("Replaced 2 string(s) in 1 file(s)"));
    assert_eq!(
        test.read_json("translations/en.json")?,
        json!({ "templates": { "index": { "Welcome": "Welcome", "Next": "Next" } } })
    );
    Ok(())
}

#[test]
fn test_fix_apply_without_catalog_reports_instead() -> Result<()> {
    let test = button_project()?;
    let before = test.read_file("ast/button.ast.json")?;

    let output = test.fix_command().arg("--apply").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("translation catalog translations/en.json does not exist"));
    assert!(out.contains("warning: \"Could not extract \"Save\" into the translation catalog\"  catalog"));
    assert!(out.contains("app/components/button.hbs:2:3"));
    assert!(!out.contains("Replaced"));

    assert_eq!(test.read_file("ast/button.ast.json")?, before);
    assert!(!test.root().join("translations").exists());
    Ok(())
}

#[test]
fn test_fix_apply_keeps_existing_entries() -> Result<()> {
    let test = button_project()?;
    test.write_file(
        "translations/en.json",
        "{\n  \"zeta\": \"Z\",\n  \"components\": {\n    \"button\": {\n      \"Save\": \"Keep me\"\n    }\n  }\n}\n",
    )?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(1));
    let document = test.read_json("ast/button.ast.json")?;
    assert_eq!(
        first_child_chars(&document),
        Some(r#"{{t "components.button.Save"}}"#)
    );
    // Existing translations are never overwritten, key order is kept.
    assert_eq!(
        test.read_file("translations/en.json")?,
        "{\n  \"zeta\": \"Z\",\n  \"components\": {\n    \"button\": {\n      \"Save\": \"Keep me\"\n    }\n  }\n}\n"
    );
    Ok(())
}

#[test]
fn test_fix_apply_with_locale_and_translations_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(".barestringsrc.json", &json!({ "translationsDir": "locales" }))?;
    test.write_file("locales/de.json", "{}\n")?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text("Hallo", 1, 1)],
    )?;

    let output = test
        .fix_command()
        .args(["--apply", "--locale", "de"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("locales/de.json")?,
        json!({ "templates": { "index": { "Hallo": "Hallo" } } })
    );
    assert!(!test.root().join("translations").exists());
    Ok(())
}

#[test]
fn test_fix_nothing_to_do() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("translations/en.json", "{}\n")?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text(" - ", 1, 1)],
    )?;

    let output = test.fix_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 template - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_fix_apply_continues_after_write_failure() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("translations/en.json", "{}\n")?;
    test.write_document(
        "ast/a.ast.json",
        "app/templates/a.hbs",
        vec![text("Alpha", 1, 1)],
    )?;
    test.write_document(
        "ast/b.ast.json",
        "app/templates/b.hbs",
        vec![text("Beta", 1, 1)],
    )?;

    let locked = test.root().join("ast/a.ast.json");
    let mut permissions = std::fs::metadata(&locked)?.permissions();
    permissions.set_readonly(true);
    std::fs::set_permissions(&locked, permissions)?;
    if std::fs::OpenOptions::new().write(true).open(&locked).is_ok() {
        // Permissions are not enforced for this user (e.g. root).
        return Ok(());
    }
    let before = test.read_file("ast/a.ast.json")?;

    let output = test.fix_command().arg("--apply").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2), "stdout: {}", out);
    assert!(out.contains("error: \"Could not write template document\"  write-error\n  --> ast/a.ast.json\n"));
    assert!(out.contains("app/templates/a.hbs:1:1"));
    assert!(out.contains("Replaced 1 string(s) in 1 file(s)"));

    assert_eq!(test.read_file("ast/a.ast.json")?, before);
    let document = test.read_json("ast/b.ast.json")?;
    assert_eq!(
        document["template"]["body"][0]["chars"],
        json!(r#"{{t "templates.b.Beta"}}"#)
    );
    Ok(())
}
