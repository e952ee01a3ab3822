//! Issue types for lint results.
//!
//! Each issue is self-contained with everything the reporter needs to show it:
//! the file, the position, the message and its severity.

use enum_dispatch::enum_dispatch;

use crate::rule::{CatalogFailure, Violation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    BareStrings,
    Catalog,
    ParseError,
    WriteError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::BareStrings => write!(f, "no-bare-strings"),
            Rule::Catalog => write!(f, "catalog"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::WriteError => write!(f, "write-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Untranslated text in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareStringIssue {
    pub file_path: String,
    pub violation: Violation,
}

/// A fix that was skipped because the catalog could not be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogWarningIssue {
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub error: String,
}

impl CatalogWarningIssue {
    pub fn from_failure(file_path: &str, failure: &CatalogFailure) -> Self {
        Self {
            file_path: file_path.to_string(),
            line: failure.violation.line,
            column: failure.violation.column,
            text: failure.violation.source.trim().to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// A template document that could not be read or deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// A fixed template document that could not be written back.
///
/// Catalog entries added for it stay in place; its text is reported as
/// still untranslated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteErrorIssue {
    pub file_path: String,
    pub error: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    BareString(BareStringIssue),
    CatalogWarning(CatalogWarningIssue),
    ParseError(ParseErrorIssue),
    WriteError(WriteErrorIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Where an issue points to.
pub struct ReportLocation<'a> {
    pub file_path: &'a str,
    /// 1-based; `None` for file-level issues.
    pub position: Option<(usize, usize)>,
}

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for BareStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            position: Some((self.violation.line, self.violation.column)),
        }
    }

    fn message(&self) -> String {
        self.violation.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::BareStrings
    }

    fn details(&self) -> Option<String> {
        Some(format!("source: {:?}", self.violation.source))
    }
}

impl Report for CatalogWarningIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            position: Some((self.line, self.column)),
        }
    }

    fn message(&self) -> String {
        format!("Could not extract {:?} into the translation catalog", self.text)
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::Catalog
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            position: None,
        }
    }

    fn message(&self) -> String {
        "Could not read template document".to_string()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for WriteErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            file_path: &self.file_path,
            position: None,
        }
    }

    fn message(&self) -> String {
        "Could not write template document".to_string()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::WriteError
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}
