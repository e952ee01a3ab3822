//! Loading and saving template documents (`*.ast.json`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

use crate::ast::TemplateDocument;

pub const DOCUMENT_EXTENSION: &str = ".ast.json";

/// Result of scanning for documents.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, deduplicated.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Patterns without wildcards are treated as literal path prefixes.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

struct Ignores {
    literal: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl Ignores {
    fn new(project_root: &Path, patterns: &[String]) -> Result<Self> {
        let mut literal = Vec::new();
        let mut globs = Vec::new();
        for pattern in patterns {
            if is_glob_pattern(pattern) {
                globs.push(
                    Pattern::new(pattern)
                        .with_context(|| format!("Invalid ignore pattern: \"{}\"", pattern))?,
                );
            } else {
                literal.push(project_root.join(pattern));
            }
        }
        Ok(Self { literal, globs })
    }

    fn matches(&self, project_root: &Path, path: &Path) -> bool {
        if self.literal.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let relative = path.strip_prefix(project_root).unwrap_or(path);
        self.globs
            .iter()
            .any(|glob| glob.matches_path(relative) || glob.matches_path(path))
    }
}

pub fn is_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DOCUMENT_EXTENSION))
}

/// Collect the documents under `paths` (files or directories, relative to
/// `project_root`). With no paths, the whole project root is scanned.
pub fn scan_documents(
    project_root: &Path,
    paths: &[PathBuf],
    ignores: &[String],
) -> Result<ScanResult> {
    let ignores = Ignores::new(project_root, ignores)?;
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![project_root.to_path_buf()]
    } else {
        paths.iter().map(|p| project_root.join(p)).collect()
    };

    let mut result = ScanResult::default();
    for root in roots {
        if !root.exists() {
            tracing::warn!(path = %root.display(), "path does not exist");
            result.skipped_count += 1;
            continue;
        }
        for entry in WalkDir::new(&root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "cannot access path");
                    result.skipped_count += 1;
                    continue;
                }
            };
            let path = entry.path();
            if ignores.matches(project_root, path) {
                continue;
            }
            if entry.file_type().is_file() && is_document(path) {
                result.files.push(path.to_path_buf());
            }
        }
    }

    result.files.sort();
    result.files.dedup();
    tracing::debug!(count = result.files.len(), "scanned template documents");
    Ok(result)
}

pub fn read_document(path: &Path) -> Result<TemplateDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `document` back as 2-space indented JSON with a trailing newline.
pub fn write_document(path: &Path, document: &TemplateDocument) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
