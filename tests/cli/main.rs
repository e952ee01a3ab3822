use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;

mod check;
mod fix;
mod init;

const BIN_NAME: &str = "bare-strings";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config lookup from escaping the temporary project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
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

    pub fn write_json(&self, path: &str, value: &Value) -> Result<()> {
        self.write_file(path, &serde_json::to_string_pretty(value)?)
    }

    /// Write an AST document for the template at `file_path`.
    pub fn write_document(&self, path: &str, file_path: &str, body: Vec<Value>) -> Result<()> {
        self.write_json(path, &document(file_path, body))
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

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn fix_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("fix");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        Ok(serde_json::from_str(&self.read_file(path)?)?)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================
// AST builders
// ============================================================

pub fn document(file_path: &str, body: Vec<Value>) -> Value {
    json!({ "filePath": file_path, "template": { "type": "Template", "body": body } })
}

pub fn loc(line: usize, column: usize) -> Value {
    json!({ "line": line, "column": column })
}

pub fn text(chars: &str, line: usize, column: usize) -> Value {
    json!({ "type": "TextNode", "chars": chars, "loc": loc(line, column) })
}

pub fn element(tag: &str, attributes: Vec<Value>, children: Vec<Value>) -> Value {
    json!({ "type": "ElementNode", "tag": tag, "attributes": attributes, "children": children })
}

pub fn attr(name: &str, value: Value) -> Value {
    json!({ "type": "AttrNode", "name": name, "value": value })
}

pub fn mustache_path(original: &str, line: usize, column: usize) -> Value {
    json!({
        "type": "MustacheStatement",
        "path": { "type": "PathExpression", "original": original, "loc": loc(line, column) },
        "loc": loc(line, column)
    })
}

/// Body text of the first element in a document's template.
pub fn first_child_chars(document: &Value) -> Option<&str> {
    document["template"]["body"][0]["children"][0]["chars"].as_str()
}
