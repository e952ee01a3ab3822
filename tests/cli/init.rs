use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout, text};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .barestringsrc.json\n");

    let content = test.read_file(".barestringsrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(
        parsed,
        json!({
            "rule": true,
            "locale": "en",
            "translationsDir": "translations",
            "ignores": []
        })
    );
    assert!(content.contains("\n  \"rule\""), "2-space indentation");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".barestringsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: .barestringsrc.json already exists\n"
    );
    assert_eq!(test.read_file(".barestringsrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_document(
        "ast/index.ast.json",
        "app/templates/index.hbs",
        vec![text(" | ", 1, 1)],
    )?;

    let output = test.check_command().output()?;

    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    Ok(())
}
