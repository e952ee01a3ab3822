//! The bare strings rule.
//!
//! Detection walks a template with [`BareStringsChecker`] and yields
//! [`Violation`]s. In fix mode, the [`Fixer`] then rewrites eligible text nodes
//! into translation helper calls and records the extracted strings in the
//! locale catalog.
//!
//! ## Module Structure
//!
//! - `context`: element ancestry stack and ignored-element tracking
//! - `checker`: template traversal and candidate classification
//! - `violation`: the diagnostic produced for each bare string
//! - `fixer`: rewriting of text nodes and catalog updates

mod checker;
mod context;
mod fixer;
mod violation;

pub use checker::BareStringsChecker;
pub use context::{ElementContext, ElementState, IGNORED_ELEMENTS};
pub use fixer::{
    CatalogFailure, Fixer, LintOutcome, Replacement, TRANSLATION_HELPER, helper_invocation,
};
pub use violation::{MESSAGE, Violation, attribute_context};

use crate::{
    ast::{Template, TemplateDocument},
    catalog::CatalogWriter,
    config::RuleConfig,
};

/// How the host is running the rule.
#[derive(Debug, Clone, Copy)]
pub enum RunMode<'a> {
    /// Report every violation.
    Report,
    /// Rewrite what can be rewritten, recording strings in the catalog.
    Fix(&'a CatalogWriter),
}

/// Find all bare strings in a template.
pub fn check_template(template: &Template, config: &RuleConfig) -> Vec<Violation> {
    BareStringsChecker::new(config).check(template)
}

/// Lint one document. In fix mode the document's template is modified in place.
pub fn lint_document(
    document: &mut TemplateDocument,
    config: &RuleConfig,
    mode: RunMode<'_>,
) -> LintOutcome {
    let violations = check_template(&document.template, config);
    match mode {
        RunMode::Report => LintOutcome {
            violations,
            ..Default::default()
        },
        RunMode::Fix(catalog) => {
            Fixer::new(catalog, &document.file_path).apply(&mut document.template, violations)
        }
    }
}
