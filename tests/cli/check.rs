use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, attr, element, mustache_path, stderr, stdout, text};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::new()?;
    test.write_document(
        "ast/button.ast.json",
        "app/components/button.hbs",
        vec![element(
            "button",
            vec![],
            vec![mustache_path("t", 1, 9), text(" : ", 1, 20)],
        )],
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 template - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_check_reports_bare_strings() -> Result<()> {
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

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains(
        "error: \"Non-translated string used in `title` attribute\"  no-bare-strings\n  --> app/components/button.hbs:1:16\n"
    ));
    assert!(out.contains(
        "error: \"Non-translated string used\"  no-bare-strings\n  --> app/components/button.hbs:2:3\n"
    ));
    assert!(out.contains("\u{2718} 2 problems (2 errors, 0 warnings)"));
    Ok(())
}

#[test]
fn test_check_skips_ignored_elements() -> Result<()> {
    let test = CliTest::new()?;
    test.write_document(
        "ast/snippet.ast.json",
        "app/components/snippet.hbs",
        vec![element(
            "pre",
            vec![],
            vec![element("code", vec![], vec![text("let x = 1;", 1, 11)])],
        )],
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn test_check_does_not_modify_documents() -> Result<()> {
    let test = CliTest::new()?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text("Welcome", 1, 1)],
    )?;
    test.write_file("translations/en.json", "{}\n")?;
    let before = test.read_file("ast/index.ast.json")?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file("ast/index.ast.json")?, before);
    assert_eq!(test.read_file("translations/en.json")?, "{}\n");
    Ok(())
}

#[test]
fn test_check_uses_config_allowlist() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(
        ".barestringsrc.json",
        &json!({ "rule": ["Acme", "(", ")"] }),
    )?;
    test.write_document(
        "ast/logo.ast.json",
        "app/components/logo.hbs",
        vec![text("Acme", 1, 1), text("(Acme)", 2, 1)],
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    Ok(())
}

#[test]
fn test_check_rule_disabled() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(".barestringsrc.json", &json!({ "rule": false }))?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text("Welcome", 1, 1)],
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Rule is disabled in .barestringsrc.json"));
    Ok(())
}

#[test]
fn test_check_invalid_rule_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(".barestringsrc.json", &json!({ "rule": "yes" }))?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error:"), "stderr: {}", err);
    assert!(err.contains("You specified `\"yes\"`"), "stderr: {}", err);
    Ok(())
}

#[test]
fn test_check_ignores_and_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(".barestringsrc.json", &json!({ "ignores": ["vendor"] }))?;
    test.write_document(
        "vendor/lib.ast.json",
        "vendor/lib.hbs",
        vec![text("Vendor text", 1, 1)],
    )?;
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

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("app/templates/a.hbs:1:1"));
    assert!(out.contains("app/templates/b.hbs:1:1"));
    assert!(!out.contains("vendor/lib.hbs"));

    let output = test.check_command().arg("ast/b.ast.json").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("app/templates/b.hbs:1:1"));
    assert!(!out.contains("app/templates/a.hbs"));
    Ok(())
}

#[test]
fn test_check_reports_unreadable_document() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("ast/broken.ast.json", "{ \"filePath\": ")?;
    test.write_document(
        "ast/ok.ast.json",
        "app/templates/ok.hbs",
        vec![mustache_path("outlet", 1, 1)],
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(out.contains("error: \"Could not read template document\"  parse-error"));
    assert!(out.contains("  --> ast/broken.ast.json\n"));
    Ok(())
}

#[test]
fn test_check_reports_malformed_known_node() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(
        "ast/broken.ast.json",
        &json!({
            "filePath": "app/templates/broken.hbs",
            "template": {
                "body": [{
                    "type": "ElementNode",
                    "tag": "div",
                    "children": [{ "type": "TextNode", "loc": { "line": 1, "column": 6 } }]
                }]
            }
        }),
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2), "stdout: {}", out);
    assert!(out.contains("error: \"Could not read template document\"  parse-error"));
    assert!(out.contains("invalid TextNode"));
    assert!(!out.contains("no issues found"));
    Ok(())
}

#[test]
fn test_check_without_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
