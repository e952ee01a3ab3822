use std::process::ExitCode;

use crate::issues::{Issue, Report, Severity};

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): no bare strings left to report
/// - `Failure` (1): bare strings found, or work left to do in a dry run
/// - `Error` (2): setup failed or documents could not be read
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Unreadable or unwritable documents win over findings; warnings alone
    /// never fail.
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues
            .iter()
            .any(|i| matches!(i, Issue::ParseError(_) | Issue::WriteError(_)))
        {
            ExitStatus::Error
        } else if issues
            .iter()
            .any(|i| i.report_severity() == Severity::Error)
        {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
