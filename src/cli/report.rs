//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Every printer has a `_to`
//! variant taking a writer so output can be captured in tests.

use std::io::{self, Write};

use colored::Colorize;

use crate::issues::{Issue, Report, Severity};
use crate::rule::Replacement;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(templates: usize) {
    print_success_to(templates, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(templates: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            templates,
            if templates == 1 {
                "template"
            } else {
                "templates"
            }
        )
        .green()
    );
}

pub fn print_rule_disabled(config_file: &str) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Rule is disabled in {}", config_file).green()
    );
}

/// Print planned or applied replacements grouped under their template.
pub fn print_replacements_to<W: Write>(
    file_path: &str,
    replacements: &[Replacement],
    writer: &mut W,
) {
    for replacement in replacements {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            file_path,
            replacement.line,
            replacement.column
        );
        let _ = writeln!(writer, "     {}", "|".blue());
        let _ = writeln!(
            writer,
            "     {} {:?}",
            "-".red(),
            replacement.source.trim()
        );
        let _ = writeln!(writer, "     {} {}", "+".green(), replacement.invocation);
        let _ = writeln!(writer);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (line, col) = loc.position.unwrap_or((0, 0));

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    if loc.position.is_some() {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            loc.file_path,
            line,
            col
        );
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path);
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| i.location().position.map(|(line, _)| line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();

    a_loc
        .file_path
        .cmp(b_loc.file_path)
        .then_with(|| a_loc.position.cmp(&b_loc.position))
        .then_with(|| a.report_rule().cmp(&b.report_rule()))
}
