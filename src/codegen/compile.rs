//! Document Tree → Module AST.

use tracing::trace;

use crate::document::{Node, RENDER_KEY};

use super::ast::{FunctionDecl, Lowered, Module, Param, Stmt, TypeAnnotation};
use super::element::build_element_tree;
use super::expr::PROPS_PARAM;
use super::hooks::{build_hook, build_imports, default_imports};

/// Name used when the document does not carry one.
pub const DEFAULT_COMPONENT_NAME: &str = "Component";

/// Whether the component initializes hooks before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Stateless,
    Stateful,
}

impl ComponentKind {
    pub fn of(hooks: &[Node]) -> Self {
        if hooks.is_empty() {
            ComponentKind::Stateless
        } else {
            ComponentKind::Stateful
        }
    }
}

/// Build the module for one document. Total over any tree: unexpected shapes
/// degrade to `null` or empty statements.
pub fn compile_document(doc: &Node) -> Module {
    let name = doc
        .get("name")
        .and_then(Node::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_COMPONENT_NAME)
        .to_string();
    let hooks = doc.get("hooks").and_then(Node::as_sequence).unwrap_or_default();
    let kind = ComponentKind::of(hooks);
    trace!(component = %name, ?kind, hooks = hooks.len(), "compiling component");

    let imports = match doc.get("imports").and_then(Node::as_sequence) {
        Some(entries) if !entries.is_empty() => build_imports(entries),
        _ => match kind {
            ComponentKind::Stateless => default_imports(&[]),
            ComponentKind::Stateful => default_imports(hooks),
        },
    };

    let mut body: Vec<Stmt> = match kind {
        ComponentKind::Stateless => Vec::new(),
        ComponentKind::Stateful => hooks.iter().map(build_hook).collect(),
    };
    let render = doc
        .get(RENDER_KEY)
        .map_or(Lowered::Empty, build_element_tree);
    body.push(Stmt::Return(render.or_null()));

    Module {
        imports,
        function: FunctionDecl {
            name: name.clone(),
            params: vec![Param {
                name: PROPS_PARAM.to_string(),
                annotation: Some(props_annotation(doc.get("props"))),
            }],
            body,
        },
        default_export: name,
    }
}

/// Type of the `props` parameter, from the document's `props` declarations.
fn props_annotation(props: Option<&Node>) -> TypeAnnotation {
    match props.and_then(Node::as_mapping) {
        Some(fields) if !fields.is_empty() => TypeAnnotation::Object(
            fields
                .iter()
                .map(|(key, ty)| (key.to_string(), type_text(ty)))
                .collect(),
        ),
        _ => TypeAnnotation::Raw("any".to_string()),
    }
}

fn type_text(node: &Node) -> String {
    match node {
        Node::Expr(tagged) if !tagged.code.trim().is_empty() => tagged.code.trim().to_string(),
        Node::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => "any".to_string(),
    }
}
