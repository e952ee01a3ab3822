use crate::{
    allowlist::find_bare_text,
    ast::{
        AttrNode, AttrValue, ConcatPart, ElementNode, Expression, MustacheStatement, NodePath,
        SourceLocation, StringLiteral, Template, TextNode, Visit, walk_template,
    },
    config::RuleConfig,
};

use super::{
    context::ElementContext,
    violation::{Violation, attribute_context},
};

/// A located piece of template text that may need translating.
enum Candidate<'n> {
    /// A text node. `fix_target` is set for body text only.
    TextLiteral {
        node: &'n TextNode,
        fix_target: Option<NodePath>,
    },
    /// An attribute value made of several parts.
    ConcatenationOfParts(&'n [ConcatPart]),
    /// A string literal in a mustache, located at the literal or its mustache.
    StringLiteralExpr {
        literal: &'n StringLiteral,
        loc: Option<SourceLocation>,
    },
    /// The path (callee position) of a mustache.
    DynamicExpressionPath(&'n MustacheStatement),
}

/// Collects bare strings from one template.
pub struct BareStringsChecker<'a> {
    config: &'a RuleConfig,
    elements: ElementContext,
    violations: Vec<Violation>,
}

impl<'a> BareStringsChecker<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self {
            config,
            elements: ElementContext::new(),
            violations: Vec::new(),
        }
    }

    pub fn check(mut self, template: &Template) -> Vec<Violation> {
        walk_template(&mut self, template);
        self.violations
    }

    fn is_attribute_checked(&self, name: &str) -> bool {
        if self.config.global_attributes.contains(name) {
            return true;
        }
        self.elements
            .current_tag()
            .and_then(|tag| self.config.element_attributes.get(tag))
            .is_some_and(|attributes| attributes.contains(name))
    }

    fn inspect(&mut self, candidate: Candidate<'_>, context: Option<&str>) {
        match candidate {
            Candidate::TextLiteral { node, fix_target } => {
                self.check_text(&node.chars, node.loc, context, fix_target);
            }
            Candidate::ConcatenationOfParts(parts) => {
                for part in parts {
                    let candidate = match part {
                        ConcatPart::TextNode(node) => Candidate::TextLiteral {
                            node,
                            fix_target: None,
                        },
                        ConcatPart::MustacheStatement(mustache) => {
                            Candidate::DynamicExpressionPath(mustache)
                        }
                    };
                    self.inspect(candidate, context);
                }
            }
            Candidate::StringLiteralExpr { literal, loc } => {
                self.check_text(&literal.value, loc, context, None);
            }
            Candidate::DynamicExpressionPath(mustache) => {
                if let Expression::StringLiteral(literal) = &mustache.path {
                    let loc = literal.loc.or(mustache.loc);
                    self.inspect(Candidate::StringLiteralExpr { literal, loc }, context);
                }
            }
        }
    }

    fn check_text(
        &mut self,
        raw: &str,
        loc: Option<SourceLocation>,
        context: Option<&str>,
        fix_target: Option<NodePath>,
    ) {
        // Synthetic nodes have no position to report.
        let Some(loc) = loc else {
            return;
        };
        if let Some(text) = find_bare_text(raw, &self.config.allowlist) {
            self.violations
                .push(Violation::new(text, loc, context).with_fix_target(fix_target));
        }
    }
}

impl Visit for BareStringsChecker<'_> {
    fn enter_element(&mut self, node: &ElementNode) {
        self.elements.push(&node.tag);
    }

    fn exit_element(&mut self, _node: &ElementNode) {
        self.elements.pop();
    }

    fn visit_text(&mut self, node: &TextNode, path: &NodePath) {
        if self.elements.is_ignored() {
            return;
        }
        let candidate = Candidate::TextLiteral {
            node,
            fix_target: Some(path.clone()),
        };
        self.inspect(candidate, None);
    }

    fn visit_attr(&mut self, node: &AttrNode) {
        if self.elements.is_ignored() || !self.is_attribute_checked(&node.name) {
            return;
        }
        let candidate = match &node.value {
            AttrValue::TextNode(text) => Candidate::TextLiteral {
                node: text,
                fix_target: None,
            },
            AttrValue::ConcatStatement(concat) => Candidate::ConcatenationOfParts(&concat.parts),
            AttrValue::MustacheStatement(mustache) => Candidate::DynamicExpressionPath(mustache),
            AttrValue::Other(_) => return,
        };
        let context = attribute_context(&node.name);
        self.inspect(candidate, Some(&context));
    }

    fn visit_mustache(&mut self, node: &MustacheStatement) {
        if self.elements.is_ignored() {
            return;
        }
        self.inspect(Candidate::DynamicExpressionPath(node), None);
    }
}
