//! Fix command - replace bare strings with translation helper calls.
//!
//! Body text is rewritten to `{{t "<key>"}}` and the original text is stored
//! under `<key>` in the locale catalog. Text inside attributes, concatenations
//! and mustache paths cannot be rewritten and is reported instead.
//!
//! Use `--apply` to actually rewrite documents (default is dry-run mode).
//! Applying is strictly sequential: the catalog has a single writer.

use std::{collections::HashSet, io, path::Path};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::{
    super::{
        args::FixCommand,
        exit_status::ExitStatus,
        report::{self, print_replacements_to},
    },
    context::LintContext,
    load_issue,
};
use crate::{
    ast::SourceLocation,
    catalog::CatalogWriter,
    config::RuleConfig,
    document::{read_document, write_document},
    issues::{BareStringIssue, CatalogWarningIssue, Issue, WriteErrorIssue},
    rule::{Fixer, Replacement, RunMode, Violation, check_template, lint_document},
};

/// Fixes for one template, planned or applied.
struct DocumentFixes {
    file_path: String,
    replacements: Vec<Replacement>,
    issues: Vec<Issue>,
}

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let ctx = LintContext::new(&cmd.common, &cmd.paths)?;
    let Some(rule_config) = &ctx.rule_config else {
        report::print_rule_disabled(&ctx.config_file_name());
        return Ok(ExitStatus::Success);
    };

    let catalog = ctx.catalog();
    let catalog_ready = catalog.catalog_path().is_file();
    if !catalog_ready {
        eprintln!(
            "{} translation catalog {} does not exist, no text can be extracted",
            "warning:".bold().yellow(),
            ctx.display_path(&catalog.catalog_path())
        );
    }

    let results = if cmd.apply {
        apply(&ctx, rule_config, &catalog)
    } else {
        plan(&ctx, rule_config, &catalog, catalog_ready)
    };

    let replaced: usize = results.iter().map(|r| r.replacements.len()).sum();
    let files: HashSet<&str> = results
        .iter()
        .filter(|r| !r.replacements.is_empty())
        .map(|r| r.file_path.as_str())
        .collect();
    let issues: Vec<Issue> = results.iter().flat_map(|r| r.issues.clone()).collect();

    if replaced == 0 && issues.is_empty() {
        report::print_success(ctx.documents.len());
        return Ok(ExitStatus::Success);
    }

    if !cmd.apply {
        let mut stdout = io::stdout().lock();
        for result in &results {
            print_replacements_to(&result.file_path, &result.replacements, &mut stdout);
        }
    }

    report::report(&issues);

    if replaced > 0 {
        if !issues.is_empty() {
            println!();
        }
        if cmd.apply {
            println!(
                "{} {} string(s) in {} file(s), catalog: {}",
                "Replaced".green().bold(),
                replaced,
                files.len(),
                ctx.display_path(&catalog.catalog_path())
            );
        } else {
            println!(
                "{} {} string(s) in {} file(s).",
                "Would replace".yellow().bold(),
                replaced,
                files.len()
            );
            println!("Run with {} to apply these changes.", "--apply".cyan());
        }
    }

    // In dry-run mode, planned replacements are work left to do.
    let status = ExitStatus::from_issues(&issues);
    if status == ExitStatus::Success && !cmd.apply && replaced > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(status)
    }
}

/// Work out every replacement without writing anything.
fn plan(
    ctx: &LintContext,
    rule_config: &RuleConfig,
    catalog: &CatalogWriter,
    catalog_ready: bool,
) -> Vec<DocumentFixes> {
    ctx.documents
        .par_iter()
        .map(|path| {
            let document = match read_document(path) {
                Ok(document) => document,
                Err(error) => return unreadable(ctx, path, &error),
            };

            let fixer = Fixer::new(catalog, &document.file_path);
            let mut replacements = Vec::new();
            let mut remaining = Vec::new();
            for violation in check_template(&document.template, rule_config) {
                match fixer.plan(&violation).filter(|_| catalog_ready) {
                    Some(replacement) => replacements.push(replacement),
                    None => remaining.push(violation),
                }
            }

            DocumentFixes {
                issues: bare_string_issues(&document.file_path, remaining),
                file_path: document.file_path,
                replacements,
            }
        })
        .collect()
}

/// Rewrite documents one at a time, updating the catalog as we go.
///
/// A document that cannot be written back is reported and skipped; the run
/// goes on with the next one.
fn apply(
    ctx: &LintContext,
    rule_config: &RuleConfig,
    catalog: &CatalogWriter,
) -> Vec<DocumentFixes> {
    let mut results = Vec::with_capacity(ctx.documents.len());

    for path in &ctx.documents {
        let mut document = match read_document(path) {
            Ok(document) => document,
            Err(error) => {
                results.push(unreadable(ctx, path, &error));
                continue;
            }
        };

        let outcome = lint_document(&mut document, rule_config, RunMode::Fix(catalog));
        let mut issues: Vec<Issue> = outcome
            .catalog_failures
            .iter()
            .map(|failure| {
                Issue::CatalogWarning(CatalogWarningIssue::from_failure(
                    &document.file_path,
                    failure,
                ))
            })
            .collect();
        let mut violations = outcome.violations;
        let mut replacements = outcome.fixes;

        if !replacements.is_empty() {
            match write_document(path, &document) {
                Ok(()) => tracing::debug!(
                    file = %document.file_path,
                    fixes = replacements.len(),
                    "rewrote template document"
                ),
                Err(error) => {
                    let reason = format!("{:#}", error);
                    tracing::warn!(
                        path = %path.display(),
                        error = %reason,
                        "could not write document"
                    );
                    issues.push(Issue::WriteError(WriteErrorIssue {
                        file_path: ctx.display_path(path),
                        error: format!("{:#}", error.root_cause()),
                    }));
                    violations.extend(replacements.drain(..).map(|replacement| {
                        let loc = SourceLocation::new(replacement.line, replacement.column);
                        Violation::new(&replacement.source, loc, None)
                    }));
                }
            }
        }

        issues.extend(bare_string_issues(&document.file_path, violations));
        results.push(DocumentFixes {
            file_path: document.file_path,
            replacements,
            issues,
        });
    }

    results
}

fn unreadable(ctx: &LintContext, path: &Path, error: &anyhow::Error) -> DocumentFixes {
    DocumentFixes {
        file_path: ctx.display_path(path),
        replacements: Vec::new(),
        issues: vec![load_issue(ctx, path, error)],
    }
}

fn bare_string_issues(file_path: &str, violations: Vec<Violation>) -> Vec<Issue> {
    violations
        .into_iter()
        .map(|violation| {
            Issue::BareString(BareStringIssue {
                file_path: file_path.to_string(),
                violation,
            })
        })
        .collect()
}
