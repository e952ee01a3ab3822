pub mod check;
mod context;
pub mod fix;
pub mod init;

use std::path::Path;

use context::LintContext;

use crate::issues::{Issue, ParseErrorIssue};

/// A document that could not be loaded, as an issue.
fn load_issue(ctx: &LintContext, path: &Path, error: &anyhow::Error) -> Issue {
    let reason = format!("{:#}", error);
    tracing::warn!(path = %path.display(), error = %reason, "skipping document");
    Issue::ParseError(ParseErrorIssue {
        file_path: ctx.display_path(path),
        error: format!("{:#}", error.root_cause()),
    })
}
