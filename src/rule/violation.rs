use serde::Serialize;

use crate::ast::{NodePath, SourceLocation};

pub const MESSAGE: &str = "Non-translated string used";

/// A bare string found in a template.
///
/// Serializes to the diagnostic shape hosts expect:
/// `{ message, isFixable, line, column, source }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub message: String,
    pub is_fixable: bool,
    pub line: usize,
    pub column: usize,
    /// The offending text, exactly as it appears in the node.
    pub source: String,
    /// Set only for body text nodes, the one kind the fixer rewrites.
    #[serde(skip)]
    pub fix_target: Option<NodePath>,
}

impl Violation {
    /// `context` is appended to the message, e.g. `` in `title` attribute``.
    pub fn new(source: &str, loc: SourceLocation, context: Option<&str>) -> Self {
        Self {
            message: format!("{}{}", MESSAGE, context.unwrap_or_default()),
            is_fixable: true,
            line: loc.line,
            column: loc.column,
            source: source.to_string(),
            fix_target: None,
        }
    }

    pub fn with_fix_target(mut self, target: Option<NodePath>) -> Self {
        self.fix_target = target;
        self
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Context suffix for a value found in attribute `name`.
pub fn attribute_context(name: &str) -> String {
    format!(" in `{}` attribute", name)
}
