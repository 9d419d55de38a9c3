//! Document Tree — the loosely typed value graph a YSX document loads into.
//!
//! Plain YAML/JSON values plus one marker kind, [`TaggedExpr`], for scalars
//! that carry inert source text.

use tracing::debug;

/// Tag that marks a scalar as raw executable code.
pub const RAW_CODE_TAG: &str = "js";
/// Tag that marks a scalar as a type annotation.
pub const TYPE_ANNOTATION_TAG: &str = "ts";

/// Which kind of source text a [`TaggedExpr`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    RawCode,
    TypeAnnotation,
}

impl ExprKind {
    /// Name used by the marker-mapping form `{type: ..., code: ...}`.
    pub fn marker_name(self) -> &'static str {
        match self {
            ExprKind::RawCode => "JSExpression",
            ExprKind::TypeAnnotation => "TSAnnotation",
        }
    }

    fn from_marker_name(name: &str) -> Option<Self> {
        [ExprKind::RawCode, ExprKind::TypeAnnotation]
            .into_iter()
            .find(|kind| kind.marker_name() == name)
    }

    fn from_tag(tag: &serde_yaml::value::Tag) -> Option<Self> {
        if *tag == RAW_CODE_TAG {
            Some(ExprKind::RawCode)
        } else if *tag == TYPE_ANNOTATION_TAG {
            Some(ExprKind::TypeAnnotation)
        } else {
            None
        }
    }
}

/// Verbatim source text of a declared kind. Never evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedExpr {
    pub kind: ExprKind,
    pub code: String,
}

impl TaggedExpr {
    pub fn raw(code: impl Into<String>) -> Self {
        Self {
            kind: ExprKind::RawCode,
            code: code.into(),
        }
    }

    pub fn type_annotation(code: impl Into<String>) -> Self {
        Self {
            kind: ExprKind::TypeAnnotation,
            code: code.into(),
        }
    }
}

/// A numeric scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A key-ordered mapping. Keys keep their document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing trees in code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append an entry. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn first(&self) -> Option<(&str, &Node)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// A node of the Document Tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
    Expr(TaggedExpr),
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Convert a parsed YAML value, resolving the `!js` / `!ts` tags.
    pub fn from_yaml(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(yaml_number(&n)),
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from_yaml).collect()),
            Value::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    match yaml_key(&key) {
                        Some(k) => mapping.insert(k, Node::from_yaml(value)),
                        None => debug!(?key, "dropping mapping entry with non-scalar key"),
                    }
                }
                Node::Mapping(mapping).resolve_marker()
            }
            Value::Tagged(tagged) => match ExprKind::from_tag(&tagged.tag) {
                Some(kind) => Node::Expr(TaggedExpr {
                    kind,
                    code: yaml_scalar_text(&tagged.value),
                }),
                None => {
                    debug!(tag = %tagged.tag, "ignoring unknown tag");
                    Node::from_yaml(tagged.value)
                }
            },
        }
    }

    /// Convert an in-memory JSON value. Object key order is kept as given.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(match n.as_i64() {
                Some(i) => Number::Int(i),
                None => Number::Float(n.as_f64().unwrap_or(0.0)),
            }),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from_json).collect()),
            Value::Object(map) => {
                let mapping: Mapping = map
                    .into_iter()
                    .map(|(k, v)| (k, Node::from_json(v)))
                    .collect();
                Node::Mapping(mapping).resolve_marker()
            }
        }
    }

    /// Collapse `{type: JSExpression|TSAnnotation, code: <string>}` into a tagged expression.
    fn resolve_marker(self) -> Self {
        let marker = self
            .as_mapping()
            .filter(|m| m.len() == 2)
            .and_then(|m| {
                let kind = m
                    .get("type")
                    .and_then(Node::as_str)
                    .and_then(ExprKind::from_marker_name)?;
                let code = m.get("code").and_then(Node::as_str)?;
                Some(TaggedExpr {
                    kind,
                    code: code.to_string(),
                })
            });
        match marker {
            Some(expr) => Node::Expr(expr),
            None => self,
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Int(i),
        None => Number::Float(n.as_f64().unwrap_or(0.0)),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => yaml_key(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Text of a tagged scalar. Non-scalars yield an empty string.
fn yaml_scalar_text(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => yaml_scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            debug!("tagged value is not a scalar; using empty code");
            String::new()
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Number(Number::Int(i))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Number(Number::Float(f))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Node::Mapping(m)
    }
}

impl From<TaggedExpr> for Node {
    fn from(e: TaggedExpr) -> Self {
        Node::Expr(e)
    }
}
