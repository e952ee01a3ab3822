use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::allowlist::{DEFAULT_ALLOWLIST, sanitize};

pub const CONFIG_FILE_NAME: &str = ".barestringsrc.json";

const DEFAULT_GLOBAL_ATTRIBUTES: &[&str] = &[
    "title",
    "aria-label",
    "aria-placeholder",
    "aria-roledescription",
    "aria-valuetext",
];

const DEFAULT_ELEMENT_ATTRIBUTES: &[(&str, &[&str])] =
    &[("input", &["placeholder"]), ("img", &["alt"])];

const ACCEPTED_SHAPES: &str = "The bare strings rule accepts one of the following values.
  * boolean - `true` to enable / `false` to disable
  * array -- an array of strings to allowlist
  * object -- An object with the following keys:
    * `allowlist` -- An array of allowlisted strings
    * `globalAttributes` -- An array of attributes to check on every element
    * `elementAttributes` -- An object whose keys are tag names and value is an array of attributes to check for that tag name";

/// Rule configuration that does not match any accepted shape.
///
/// Raised while setting the rule up, before any template is looked at.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{shapes}\n{reason}\nYou specified `{specified}`", shapes = ACCEPTED_SHAPES)]
pub struct ConfigError {
    pub reason: String,
    pub specified: String,
}

impl ConfigError {
    fn new(reason: impl Into<String>, specified: &Value) -> Self {
        Self {
            reason: reason.into(),
            specified: specified.to_string(),
        }
    }
}

/// Canonical rule configuration, built once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    /// Sanitized: no empty entries, longest first.
    pub allowlist: Vec<String>,
    /// Attributes checked on every element.
    pub global_attributes: BTreeSet<String>,
    /// Attributes checked only on the given tag.
    pub element_attributes: BTreeMap<String, BTreeSet<String>>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            allowlist: sanitize(DEFAULT_ALLOWLIST),
            global_attributes: default_global_attributes(),
            element_attributes: default_element_attributes(),
        }
    }
}

fn default_global_attributes() -> BTreeSet<String> {
    DEFAULT_GLOBAL_ATTRIBUTES.iter().map(|s| s.to_string()).collect()
}

fn default_element_attributes() -> BTreeMap<String, BTreeSet<String>> {
    DEFAULT_ELEMENT_ATTRIBUTES
        .iter()
        .map(|(tag, attrs)| {
            let attrs = attrs.iter().map(|s| s.to_string()).collect();
            (tag.to_string(), attrs)
        })
        .collect()
}

impl RuleConfig {
    /// Normalize a raw rule configuration.
    ///
    /// - `true`: defaults
    /// - `false` / `null`: rule disabled, returns `None`
    /// - array: custom allowlist, default attributes
    /// - object: `allowlist` (or the deprecated `whitelist` when `allowlist` is
    ///   empty), `globalAttributes`, `elementAttributes`; missing keys keep
    ///   their defaults
    pub fn normalize(value: &Value) -> Result<Option<Self>, ConfigError> {
        match value {
            Value::Bool(true) => Ok(Some(Self::default())),
            Value::Bool(false) | Value::Null => Ok(None),
            Value::Array(items) => {
                let allowlist = string_list(items, "allowlist", value)?;
                Ok(Some(Self {
                    allowlist: sanitize(allowlist.as_slice()),
                    ..Self::default()
                }))
            }
            Value::Object(map) => Self::from_object(map, value).map(Some),
            _ => Err(ConfigError::new(
                "Expected a boolean, an array or an object",
                value,
            )),
        }
    }

    fn from_object(map: &Map<String, Value>, specified: &Value) -> Result<Self, ConfigError> {
        let mut allowlist = Vec::new();
        let mut whitelist = Vec::new();
        let mut config = Self::default();

        for (key, entry) in map {
            match key.as_str() {
                "allowlist" => allowlist = expect_string_list(entry, key, specified)?,
                "whitelist" => whitelist = expect_string_list(entry, key, specified)?,
                "globalAttributes" => {
                    config.global_attributes = expect_string_list(entry, key, specified)?
                        .into_iter()
                        .collect();
                }
                "elementAttributes" => {
                    let Value::Object(tags) = entry else {
                        return Err(ConfigError::new(
                            "`elementAttributes` must be an object",
                            specified,
                        ));
                    };
                    config.element_attributes = tags
                        .iter()
                        .map(|(tag, attrs)| {
                            let attrs = expect_string_list(attrs, "elementAttributes", specified)?;
                            Ok::<_, ConfigError>((
                                tag.clone(),
                                attrs.into_iter().collect::<BTreeSet<_>>(),
                            ))
                        })
                        .collect::<Result<_, ConfigError>>()?;
                }
                other => {
                    return Err(ConfigError::new(
                        format!("Unknown key `{}`", other),
                        specified,
                    ));
                }
            }
        }

        if allowlist.is_empty() {
            allowlist = whitelist;
        }
        if !allowlist.is_empty() {
            config.allowlist = sanitize(allowlist.as_slice());
        }

        Ok(config)
    }
}

fn expect_string_list(
    entry: &Value,
    key: &str,
    specified: &Value,
) -> Result<Vec<String>, ConfigError> {
    match entry {
        Value::Array(items) => string_list(items, key, specified),
        _ => Err(ConfigError::new(
            format!("`{}` must be an array of strings", key),
            specified,
        )),
    }
}

fn string_list(
    items: &[Value],
    key: &str,
    specified: &Value,
) -> Result<Vec<String>, ConfigError> {
    items
        .iter()
        .map(|item| {
            item.as_str().map(String::from).ok_or_else(|| {
                ConfigError::new(format!("`{}` must be an array of strings", key), specified)
            })
        })
        .collect()
}

// ============================================================
// Project config file
// ============================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Raw rule configuration, normalized by [`RuleConfig::normalize`].
    #[serde(default = "default_rule")]
    pub rule: Value,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
    /// Paths or glob patterns of template documents to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_rule() -> Value {
    Value::Bool(true)
}

fn default_locale() -> String {
    crate::catalog::DEFAULT_LOCALE.to_string()
}

fn default_translations_dir() -> String {
    crate::catalog::DEFAULT_TRANSLATIONS_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: default_rule(),
            locale: default_locale(),
            translations_dir: default_translations_dir(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or the
    /// rule configuration has an unsupported shape.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        self.rule_config()?;
        Ok(())
    }

    pub fn rule_config(&self) -> Result<Option<RuleConfig>, ConfigError> {
        RuleConfig::normalize(&self.rule)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
