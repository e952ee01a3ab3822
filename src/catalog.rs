//! Translation catalog writer.
//!
//! Records extracted strings into `<project-root>/<translations-dir>/<locale>.json`.
//! The catalog has to exist already: it is never created here, and a fix that
//! cannot reach its catalog falls back to a plain report.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en";

pub const DEFAULT_TRANSLATIONS_DIR: &str = "translations";

/// Why a string could not be recorded. Never fatal for a run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("translation catalog not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read translation catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse translation catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("root of translation catalog must be an object: {}", .0.display())]
    NotAnObject(PathBuf),
    #[error("cannot add `{key}` to {}: `{segment}` is not an object", .path.display())]
    Conflict {
        path: PathBuf,
        key: String,
        segment: String,
    },
    #[error("failed to write translation catalog {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to a key in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    /// The key was already present; its value is left alone.
    Existing,
}

/// Writes extracted strings into one locale catalog.
///
/// Every call is a full read-modify-write of the catalog file, without any
/// locking. Callers must not run two writers against the same catalog at
/// the same time.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    project_root: PathBuf,
    translations_dir: PathBuf,
    locale: String,
}

impl CatalogWriter {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            translations_dir: PathBuf::from(DEFAULT_TRANSLATIONS_DIR),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_translations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.translations_dir = dir.into();
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.project_root
            .join(&self.translations_dir)
            .join(format!("{}.json", self.locale))
    }

    /// Key segments for `text` found in `file_path`.
    ///
    /// `file_path` may be absolute or relative to the project root.
    pub fn key_segments(&self, file_path: &str, text: &str) -> Vec<String> {
        let path = Path::new(file_path);
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        derive_key_segments(relative, text)
    }

    /// Record `text` (already trimmed) and return its dot-joined key.
    pub fn add_translation(&self, file_path: &str, text: &str) -> Result<String, CatalogError> {
        let segments = self.key_segments(file_path, text);
        self.insert(&segments, text)?;
        Ok(segments.join("."))
    }

    /// Set `segments` to `value` unless the key already exists.
    ///
    /// Missing intermediate segments are created as empty objects. The file is
    /// only rewritten when a key was added.
    pub fn insert(&self, segments: &[String], value: &str) -> Result<KeyAction, CatalogError> {
        let path = self.catalog_path();
        if !path.is_file() {
            return Err(CatalogError::Missing(path));
        }

        let content = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;
        let value_root: Value =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;
        let Value::Object(mut data) = value_root else {
            return Err(CatalogError::NotAnObject(path));
        };

        let action = insert_nested(&mut data, segments, value).map_err(|segment| {
            CatalogError::Conflict {
                path: path.clone(),
                key: segments.join("."),
                segment,
            }
        })?;

        if action == KeyAction::Added {
            save(&path, data)?;
            tracing::debug!(
                key = %segments.join("."),
                catalog = %path.display(),
                "added translation"
            );
        }

        Ok(action)
    }
}

/// Split a template path into key segments and append `text`.
///
/// The first directory (the project's app root) is dropped and the file
/// extension is stripped: `app/components/button.hbs` + `Save` becomes
/// `["components", "button", "Save"]`. `text` is always a single segment,
/// even if it contains dots.
pub fn derive_key_segments(relative_path: &Path, text: &str) -> Vec<String> {
    let mut segments: Vec<String> = relative_path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(file_name) = segments.last_mut() {
        let stem = Path::new(file_name.as_str())
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        if let Some(stem) = stem {
            *file_name = stem;
        }
    }

    let mut key: Vec<String> = segments.into_iter().skip(1).collect();
    key.push(text.to_string());
    key
}

/// Insert a value at a nested path, creating intermediate objects as needed.
///
/// Fails with the offending segment when an intermediate entry exists but is
/// not an object.
fn insert_nested(
    root: &mut Map<String, Value>,
    path: &[String],
    value: &str,
) -> Result<KeyAction, String> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(KeyAction::Existing);
    };

    let mut current = root;
    for segment in parents {
        let next = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match next {
            Value::Object(map) => map,
            _ => return Err(segment.clone()),
        };
    }

    if current.contains_key(last) {
        return Ok(KeyAction::Existing);
    }
    current.insert(last.clone(), Value::String(value.to_string()));
    Ok(KeyAction::Added)
}

/// Write with 2-space indentation and a trailing newline.
fn save(path: &Path, data: Map<String, Value>) -> Result<(), CatalogError> {
    let content = serde_json::to_string_pretty(&Value::Object(data)).map_err(|source| {
        CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    fs::write(path, format!("{}\n", content)).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
