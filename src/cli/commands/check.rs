//! Check command - report bare strings in template documents.
//!
//! Documents are linted in report mode, which never writes, so they are
//! processed in parallel.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use super::{
    super::{args::CheckCommand, exit_status::ExitStatus, report},
    context::LintContext,
    load_issue,
};
use crate::{
    config::RuleConfig,
    document::read_document,
    issues::{BareStringIssue, Issue},
    rule::{RunMode, lint_document},
};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = LintContext::new(&cmd.common, &cmd.paths)?;
    let Some(rule_config) = &ctx.rule_config else {
        report::print_rule_disabled(&ctx.config_file_name());
        return Ok(ExitStatus::Success);
    };

    let issues: Vec<Issue> = ctx
        .documents
        .par_iter()
        .flat_map_iter(|path| check_document(&ctx, rule_config, path))
        .collect();

    if issues.is_empty() {
        report::print_success(ctx.documents.len());
    } else {
        report::report(&issues);
    }

    Ok(ExitStatus::from_issues(&issues))
}

fn check_document(ctx: &LintContext, rule_config: &RuleConfig, path: &Path) -> Vec<Issue> {
    let mut document = match read_document(path) {
        Ok(document) => document,
        Err(error) => return vec![load_issue(ctx, path, &error)],
    };

    let outcome = lint_document(&mut document, rule_config, RunMode::Report);
    tracing::debug!(
        file = %document.file_path,
        violations = outcome.violations.len(),
        "checked template"
    );

    outcome
        .violations
        .into_iter()
        .map(|violation| {
            Issue::BareString(BareStringIssue {
                file_path: document.file_path.clone(),
                violation,
            })
        })
        .collect()
}
