use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use crate::{
    catalog::CatalogWriter,
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, RuleConfig, load_config},
    document::scan_documents,
};

/// Everything a lint command needs, resolved once at startup.
///
/// # Configuration Priority
///
/// 1. CLI arguments (`--locale`, `--project-root`)
/// 2. `.barestringsrc.json`
/// 3. Built-in defaults
pub struct LintContext {
    pub config: Config,
    /// `None` when the rule is switched off.
    pub rule_config: Option<RuleConfig>,
    pub project_root: PathBuf,
    pub config_path: Option<PathBuf>,
    /// Template documents to lint, sorted.
    pub documents: Vec<PathBuf>,
}

impl LintContext {
    pub fn new(common: &CommonArgs, paths: &[PathBuf]) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the working directory")?;
        let start_dir = match &common.project_root {
            Some(root) => cwd.join(root),
            None => cwd.clone(),
        };

        let loaded = load_config(&start_dir)?;
        let mut config = loaded.config;
        if let Some(locale) = &common.locale {
            config.locale = locale.clone();
        }

        let project_root = match (&common.project_root, &loaded.path) {
            (Some(_), _) => start_dir,
            (None, Some(path)) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone()),
            (None, None) => cwd.clone(),
        };

        let rule_config = config.rule_config()?;

        // Explicit paths are given relative to where the command runs.
        let paths: Vec<PathBuf> = paths.iter().map(|p| cwd.join(p)).collect();
        let scan = scan_documents(&project_root, &paths, &config.ignores)?;

        tracing::debug!(
            project_root = %project_root.display(),
            config = ?loaded.path,
            locale = %config.locale,
            documents = scan.files.len(),
            skipped = scan.skipped_count,
            "resolved lint context"
        );

        Ok(Self {
            config,
            rule_config,
            project_root,
            config_path: loaded.path,
            documents: scan.files,
        })
    }

    pub fn catalog(&self) -> CatalogWriter {
        CatalogWriter::new(&self.project_root)
            .with_locale(&self.config.locale)
            .with_translations_dir(&self.config.translations_dir)
    }

    /// Path of a document as shown to the user.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    pub fn config_file_name(&self) -> String {
        self.config_path
            .as_deref()
            .map(|path| self.display_path(path))
            .unwrap_or_else(|| CONFIG_FILE_NAME.to_string())
    }
}
