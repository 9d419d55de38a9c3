//! Element tree — render nodes → `React.createElement(...)` calls.
//!
//! Also hosts the props-object builder and the general value → expression
//! conversion used for attributes and hook arguments.

use tracing::debug;

use crate::document::{ExprKind, Mapping, Node, TaggedExpr};

use super::ast::{Expr, Lowered};
use super::expr::parse_expression;
use super::interpolate::interpolate;

/// Binding the framework is imported under.
pub const FRAMEWORK_ROOT: &str = "React";
/// Module the framework is imported from.
pub const FRAMEWORK_MODULE: &str = "react";
const CREATE_ELEMENT: &str = "createElement";
const CHILDREN_KEY: &str = "children";

/// Literal for a scalar node, or `None` for anything that is not a scalar literal.
///
/// The one place literal kinds are chosen. Booleans become boolean literals.
pub fn literal(node: &Node) -> Option<Expr> {
    match node {
        Node::Null => Some(Expr::Null),
        Node::Bool(b) => Some(Expr::Bool(*b)),
        Node::Number(n) => Some(Expr::Number(n.as_f64())),
        Node::String(_) | Node::Sequence(_) | Node::Mapping(_) | Node::Expr(_) => None,
    }
}

/// Lower a render node.
pub fn build_element_tree(node: &Node) -> Lowered {
    match node {
        Node::Null => Lowered::Empty,
        Node::String(s) => interpolate(s).into(),
        Node::Bool(_) | Node::Number(_) => literal(node).map_or(Lowered::Empty, Lowered::Expr),
        Node::Sequence(items) => Expr::Array(items.iter().map(lower_child).collect()).into(),
        Node::Expr(tagged) => parse_expression(&tagged.code).into(),
        Node::Mapping(mapping) => match mapping.first() {
            None => Lowered::Empty,
            Some((tag, config)) => {
                if mapping.len() > 1 {
                    debug!(tag, extra = mapping.len() - 1, "render mapping has extra keys; using the first");
                }
                build_element(tag, config).into()
            }
        },
    }
}

fn lower_child(node: &Node) -> Expr {
    build_element_tree(node).or_null()
}

/// Uppercase tags reference components; anything else is an intrinsic element name.
fn tag_ref(tag: &str) -> Expr {
    if tag.starts_with(|c: char| c.is_ascii_uppercase()) {
        Expr::ident(tag)
    } else {
        Expr::str(tag)
    }
}

fn create_element(tag: &str, props: Expr, children: Vec<Expr>) -> Expr {
    let mut args = Vec::with_capacity(children.len() + 2);
    args.push(tag_ref(tag));
    args.push(props);
    args.extend(children);
    Expr::call(
        Expr::member(Expr::ident(FRAMEWORK_ROOT), CREATE_ELEMENT),
        args,
    )
}

fn build_element(tag: &str, config: &Node) -> Expr {
    match config {
        Node::Null => create_element(tag, Expr::Null, vec![Expr::Null]),
        Node::String(s) if s.is_empty() => create_element(tag, Expr::Null, vec![Expr::Null]),
        Node::String(s) => create_element(tag, Expr::Null, vec![interpolate(s)]),
        Node::Mapping(config) => {
            let props = build_props(config.iter().filter(|(k, _)| *k != CHILDREN_KEY));
            let children = match config.get(CHILDREN_KEY) {
                None => Vec::new(),
                Some(Node::Sequence(items)) => items.iter().map(lower_child).collect(),
                Some(child) => vec![lower_child(child)],
            };
            create_element(tag, props, children)
        }
        Node::Sequence(items) => {
            debug!(tag, "element configured with a sequence; treating items as children");
            create_element(tag, Expr::Null, items.iter().map(lower_child).collect())
        }
        Node::Bool(_) | Node::Number(_) if is_falsy(config) => {
            create_element(tag, Expr::Null, vec![Expr::Null])
        }
        Node::Bool(_) | Node::Number(_) => {
            debug!(tag, "element configured with a scalar; it carries no props or children");
            create_element(tag, Expr::Null, Vec::new())
        }
        Node::Expr(_) => {
            debug!(tag, "element configured with a tagged expression; treating it as the only child");
            create_element(tag, Expr::Null, vec![lower_child(config)])
        }
    }
}

/// `false`, `0` and `NaN` configure an element like an absent config.
fn is_falsy(node: &Node) -> bool {
    match node {
        Node::Bool(b) => !b,
        Node::Number(n) => {
            let n = n.as_f64();
            n == 0.0 || n.is_nan()
        }
        _ => false,
    }
}

/// Build the props object from attribute fields. No attributes → `null`.
pub fn build_props<'a>(attrs: impl Iterator<Item = (&'a str, &'a Node)>) -> Expr {
    let properties: Vec<(String, Expr)> = attrs
        .map(|(key, value)| {
            let value = match value {
                Node::Expr(tagged) if tagged.kind == ExprKind::RawCode => raw_code_value(tagged),
                other => lower_value(other).or_null(),
            };
            (key.to_string(), value)
        })
        .collect();

    if properties.is_empty() {
        Expr::Null
    } else {
        Expr::Object(properties)
    }
}

/// Micro-parse raw code, keeping it as a string literal when there is nothing to parse.
fn raw_code_value(tagged: &TaggedExpr) -> Expr {
    match try_parse_expression(&tagged.code) {
        Some(expr) => expr,
        None => {
            debug!(code = %tagged.code, "raw code did not parse; embedding as string");
            Expr::str(tagged.code.as_str())
        }
    }
}

fn try_parse_expression(code: &str) -> Option<Expr> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(parse_expression(trimmed))
}

/// General value → expression conversion.
pub fn lower_value(node: &Node) -> Lowered {
    match node {
        Node::Null | Node::Bool(_) | Node::Number(_) => literal(node).map_or(Lowered::Empty, Lowered::Expr),
        Node::String(s) => interpolate(s).into(),
        Node::Sequence(items) => {
            Expr::Array(items.iter().map(|v| lower_value(v).or_null()).collect()).into()
        }
        Node::Expr(tagged) => parse_expression(&tagged.code).into(),
        Node::Mapping(mapping) => lower_object(mapping).into(),
    }
}

fn lower_object(mapping: &Mapping) -> Expr {
    Expr::Object(
        mapping
            .iter()
            .map(|(k, v)| (k.to_string(), lower_value(v).or_null()))
            .collect(),
    )
}
