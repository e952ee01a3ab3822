//! Template AST contract.
//!
//! The linter does not parse markup. A template parser hands over an already
//! parsed tree, usually as JSON, in the shape defined here. Node kinds follow
//! the Glimmer naming (`TextNode`, `ElementNode`, `MustacheStatement`, ...) and
//! are discriminated by their `type` field.
//!
//! Unknown node or expression kinds are kept verbatim, and so are unknown
//! fields on known nodes, so a document can be rewritten and written back
//! without losing anything the linter does not understand. A node whose
//! `type` is known but whose fields do not match is an error, never an
//! unknown node.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Position of a node in its template, 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A parsed template together with the file it came from.
///
/// `file_path` is relative to the project root (e.g. `app/components/button.hbs`)
/// and drives translation key derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    pub file_path: String,
    pub template: Template,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub body: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    TextNode(TextNode),
    ElementNode(ElementNode),
    MustacheStatement(MustacheStatement),
    BlockStatement(BlockStatement),
    #[serde(untagged)]
    Other(Value),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match type_tag(&value).as_deref() {
            Some("TextNode") => tagged_fields(value).map(Node::TextNode),
            Some("ElementNode") => tagged_fields(value).map(Node::ElementNode),
            Some("MustacheStatement") => tagged_fields(value).map(Node::MustacheStatement),
            Some("BlockStatement") => tagged_fields(value).map(Node::BlockStatement),
            _ => Ok(Node::Other(value)),
        }
    }
}

fn type_tag(value: &Value) -> Option<String> {
    value.get("type").and_then(Value::as_str).map(str::to_owned)
}

/// Deserialize a known node from its object, minus the `type` tag.
///
/// Errors name the node kind, so a malformed node is reported as such
/// instead of being kept as an unknown one.
fn tagged_fields<T, E>(mut value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    let kind = type_tag(&value).unwrap_or_default();
    if let Value::Object(fields) = &mut value {
        fields.shift_remove("type");
    }
    serde_json::from_value(value).map_err(|err| E::custom(format!("invalid {}: {}", kind, err)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub chars: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextNode {
    pub fn new(chars: impl Into<String>, loc: Option<SourceLocation>) -> Self {
        Self {
            chars: chars.into(),
            loc,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<AttrNode>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            loc: None,
            extra: Map::new(),
        }
    }

    pub fn with_attribute(mut self, attr: AttrNode) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// `{{path}}`. Only the path (callee position) matters to the linter;
/// params and hash are carried along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MustacheStatement {
    pub path: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MustacheStatement {
    pub fn new(path: Expression, loc: Option<SourceLocation>) -> Self {
        Self {
            path,
            loc,
            extra: Map::new(),
        }
    }
}

/// `{{#path}}program{{else}}inverse{{/path}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub path: Expression,
    pub program: Block,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub body: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrNode {
    pub name: String,
    pub value: AttrValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttrNode {
    pub fn new(name: impl Into<String>, value: AttrValue) -> Self {
        Self {
            name: name.into(),
            value,
            loc: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AttrValue {
    TextNode(TextNode),
    MustacheStatement(MustacheStatement),
    ConcatStatement(ConcatStatement),
    #[serde(untagged)]
    Other(Value),
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match type_tag(&value).as_deref() {
            Some("TextNode") => tagged_fields(value).map(AttrValue::TextNode),
            Some("MustacheStatement") => tagged_fields(value).map(AttrValue::MustacheStatement),
            Some("ConcatStatement") => tagged_fields(value).map(AttrValue::ConcatStatement),
            _ => Ok(AttrValue::Other(value)),
        }
    }
}

/// An attribute value built from several parts: `title="Hello {{name}}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcatStatement {
    pub parts: Vec<ConcatPart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConcatStatement {
    pub fn new(parts: Vec<ConcatPart>) -> Self {
        Self {
            parts,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConcatPart {
    TextNode(TextNode),
    MustacheStatement(MustacheStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    StringLiteral(StringLiteral),
    PathExpression(PathExpression),
    #[serde(untagged)]
    Other(Value),
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match type_tag(&value).as_deref() {
            Some("StringLiteral") => tagged_fields(value).map(Expression::StringLiteral),
            Some("PathExpression") => tagged_fields(value).map(Expression::PathExpression),
            _ => Ok(Expression::Other(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>, loc: Option<SourceLocation>) -> Self {
        Self {
            value: value.into(),
            loc,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathExpression {
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathExpression {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            loc: None,
            extra: Map::new(),
        }
    }
}

// ============================================================
// Node paths
// ============================================================

/// One step from a node list down to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Index into the template body or an element's children.
    Child(usize),
    /// Index into a block's main program.
    Program(usize),
    /// Index into a block's `{{else}}` branch.
    Inverse(usize),
}

/// Address of a body node, from the template root down.
///
/// Detection works on a shared borrow of the tree; the fixer uses these
/// paths afterwards to reach the same text nodes mutably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

impl Template {
    pub fn new(body: Vec<Node>) -> Self {
        Self {
            body,
            extra: Map::new(),
        }
    }

    /// Resolve a path produced by [`walk_template`] to its text node.
    pub fn text_node_mut(&mut self, path: &NodePath) -> Option<&mut TextNode> {
        let (first, rest) = path.segments().split_first()?;
        let PathSegment::Child(index) = first else {
            return None;
        };
        let mut node = self.body.get_mut(*index)?;
        for segment in rest {
            node = match (node, segment) {
                (Node::ElementNode(element), PathSegment::Child(i)) => {
                    element.children.get_mut(*i)?
                }
                (Node::BlockStatement(block), PathSegment::Program(i)) => {
                    block.program.body.get_mut(*i)?
                }
                (Node::BlockStatement(block), PathSegment::Inverse(i)) => {
                    block.inverse.as_mut()?.body.get_mut(*i)?
                }
                _ => return None,
            };
        }
        match node {
            Node::TextNode(text) => Some(text),
            _ => None,
        }
    }
}

// ============================================================
// Visitor
// ============================================================

/// Callbacks invoked by [`walk_template`].
///
/// Attributes are handed over whole; their values are never walked
/// separately, so `visit_text` and `visit_mustache` only ever see body nodes.
pub trait Visit {
    fn enter_element(&mut self, _node: &ElementNode) {}

    fn exit_element(&mut self, _node: &ElementNode) {}

    fn visit_text(&mut self, _node: &TextNode, _path: &NodePath) {}

    fn visit_attr(&mut self, _node: &AttrNode) {}

    fn visit_mustache(&mut self, _node: &MustacheStatement) {}
}

/// Depth-first walk over a template.
///
/// For every element: `enter_element`, each attribute, the children, then
/// `exit_element`.
pub fn walk_template<V: Visit + ?Sized>(visitor: &mut V, template: &Template) {
    let mut path = NodePath::default();
    walk_nodes(visitor, &template.body, &mut path, PathSegment::Child);
}

fn walk_nodes<V: Visit + ?Sized>(
    visitor: &mut V,
    nodes: &[Node],
    path: &mut NodePath,
    segment: fn(usize) -> PathSegment,
) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(segment(index));
        walk_node(visitor, node, path);
        path.pop();
    }
}

fn walk_node<V: Visit + ?Sized>(visitor: &mut V, node: &Node, path: &mut NodePath) {
    match node {
        Node::TextNode(text) => visitor.visit_text(text, path),
        Node::ElementNode(element) => {
            visitor.enter_element(element);
            for attr in &element.attributes {
                visitor.visit_attr(attr);
            }
            walk_nodes(visitor, &element.children, path, PathSegment::Child);
            visitor.exit_element(element);
        }
        Node::MustacheStatement(mustache) => visitor.visit_mustache(mustache),
        Node::BlockStatement(block) => {
            walk_nodes(visitor, &block.program.body, path, PathSegment::Program);
            if let Some(inverse) = &block.inverse {
                walk_nodes(visitor, &inverse.body, path, PathSegment::Inverse);
            }
        }
        Node::Other(_) => {}
    }
}
