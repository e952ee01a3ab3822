use crate::{
    ast::{NodePath, Template},
    catalog::{CatalogError, CatalogWriter},
};

use super::violation::Violation;

/// Name of the translation helper fixed text is routed through.
pub const TRANSLATION_HELPER: &str = "t";

/// `{{t "key"}}`, or `None` if the key cannot be quoted.
pub fn helper_invocation(key: &str) -> Option<String> {
    let quote = if !key.contains('"') {
        '"'
    } else if !key.contains('\'') {
        '\''
    } else {
        return None;
    };
    Some(format!(
        "{{{{{} {quote}{}{quote}}}}}",
        TRANSLATION_HELPER, key
    ))
}

/// A rewrite of one text node, planned or applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub line: usize,
    pub column: usize,
    /// Original text of the node.
    pub source: String,
    pub key: String,
    /// New text of the node.
    pub invocation: String,
}

/// A fix that degraded to a report because the catalog could not be updated.
#[derive(Debug)]
pub struct CatalogFailure {
    pub violation: Violation,
    pub error: CatalogError,
}

/// Result of linting one template.
#[derive(Debug, Default)]
pub struct LintOutcome {
    /// Violations left to report: everything in report mode, whatever could
    /// not be fixed in fix mode.
    pub violations: Vec<Violation>,
    pub fixes: Vec<Replacement>,
    pub catalog_failures: Vec<CatalogFailure>,
}

/// Rewrites body text nodes of one template into translation helper calls.
pub struct Fixer<'a> {
    catalog: &'a CatalogWriter,
    file_path: &'a str,
}

impl<'a> Fixer<'a> {
    pub fn new(catalog: &'a CatalogWriter, file_path: &'a str) -> Self {
        Self { catalog, file_path }
    }

    /// Work out the rewrite for a violation without touching anything.
    ///
    /// `None` for violations outside body text or whose key cannot be quoted.
    pub fn plan(&self, violation: &Violation) -> Option<Replacement> {
        violation.fix_target.as_ref()?;
        let text = violation.source.trim();
        let key = self.catalog.key_segments(self.file_path, text).join(".");
        let invocation = helper_invocation(&key)?;
        Some(Replacement {
            line: violation.line,
            column: violation.column,
            source: violation.source.clone(),
            key,
            invocation,
        })
    }

    pub fn apply(&self, template: &mut Template, violations: Vec<Violation>) -> LintOutcome {
        let mut outcome = LintOutcome::default();

        for violation in violations {
            let Some(target) = violation.fix_target.clone() else {
                outcome.violations.push(violation);
                continue;
            };

            match self.fix_one(template, &target, &violation) {
                Ok(Some(replacement)) => outcome.fixes.push(replacement),
                Ok(None) => outcome.violations.push(violation),
                Err(error) => {
                    tracing::warn!(
                        file = %self.file_path,
                        line = violation.line,
                        column = violation.column,
                        %error,
                        "could not record translation, reporting instead"
                    );
                    outcome.catalog_failures.push(CatalogFailure {
                        violation: violation.clone(),
                        error,
                    });
                    outcome.violations.push(violation);
                }
            }
        }

        outcome
    }

    fn fix_one(
        &self,
        template: &mut Template,
        target: &NodePath,
        violation: &Violation,
    ) -> Result<Option<Replacement>, CatalogError> {
        let Some(replacement) = self.plan(violation) else {
            return Ok(None);
        };
        let Some(node) = template.text_node_mut(target) else {
            return Ok(None);
        };

        let text = violation.source.trim();
        let segments = self.catalog.key_segments(self.file_path, text);
        self.catalog.insert(&segments, text)?;

        node.chars = replacement.invocation.clone();
        Ok(Some(replacement))
    }
}
