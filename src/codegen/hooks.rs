//! Hook statements and import declarations.

use tracing::debug;

use crate::document::Node;

use super::ast::{ArrowBody, Expr, ImportDecl, Lowered, Stmt};
use super::element::{lower_value, FRAMEWORK_MODULE, FRAMEWORK_ROOT};

pub const USE_STATE: &str = "useState";
pub const USE_EFFECT: &str = "useEffect";

/// Placeholder logged by every generated effect body.
///
/// The document's `effect.code` is accepted but not substituted yet.
pub const EFFECT_PLACEHOLDER: &str = "Effect running";

/// Lower one `{<hookKind>: <config>}` entry into a statement.
pub fn build_hook(hook: &Node) -> Stmt {
    let Some((kind, config)) = hook.as_mapping().and_then(|m| m.first()) else {
        debug!("hook entry is not a single-key mapping; emitting empty statement");
        return Stmt::Empty;
    };
    match kind {
        USE_STATE => state_hook(config),
        USE_EFFECT => effect_hook(config),
        _ => {
            debug!(kind, "unknown hook kind; emitting empty statement");
            Stmt::Empty
        }
    }
}

/// `const [x, setX] = useState(<initialValue>);`
fn state_hook(config: &Node) -> Stmt {
    let Some(variable) = config.get("variable").and_then(Node::as_str).filter(|v| !v.is_empty()) else {
        debug!("useState without a variable name; emitting empty statement");
        return Stmt::Empty;
    };
    let initial = config
        .get("initialValue")
        .map_or(Lowered::Empty, lower_value)
        .or_null();

    Stmt::ConstArrayPattern {
        names: vec![variable.to_string(), setter_name(variable)],
        init: Expr::call(Expr::ident(USE_STATE), vec![initial]),
    }
}

/// `useEffect(() => { console.log("Effect running"); }, [deps]);`
fn effect_hook(config: &Node) -> Stmt {
    let dependencies = config
        .get("dependencies")
        .and_then(Node::as_sequence)
        .unwrap_or_default()
        .iter()
        .filter_map(|dep| match dep {
            Node::String(name) => Some(Expr::ident(name.as_str())),
            Node::Number(n) => Some(Expr::ident(n.to_string())),
            _ => {
                debug!(?dep, "skipping non-scalar effect dependency");
                None
            }
        })
        .collect();

    let placeholder = Stmt::Expr(Expr::call(
        Expr::member(Expr::ident("console"), "log"),
        vec![Expr::str(EFFECT_PLACEHOLDER)],
    ));
    let effect = Expr::Arrow {
        params: Vec::new(),
        body: ArrowBody::Block(vec![placeholder]),
    };

    Stmt::Expr(Expr::call(
        Expr::ident(USE_EFFECT),
        vec![effect, Expr::Array(dependencies)],
    ))
}

/// `count` → `setCount`
pub fn setter_name(variable: &str) -> String {
    let mut chars = variable.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Hook kinds referenced by `hooks`, de-duplicated in first-seen order.
pub fn used_hooks(hooks: &[Node]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for hook in hooks {
        if let Some((kind, _)) = hook.as_mapping().and_then(|m| m.first()) {
            if !names.iter().any(|n| n == kind) {
                names.push(kind.to_string());
            }
        }
    }
    names
}

/// Imports for a document without an explicit `imports` list.
///
/// Stateless components get the framework root alone; stateful ones also
/// import every hook kind they use.
pub fn default_imports(hooks: &[Node]) -> Vec<ImportDecl> {
    vec![ImportDecl {
        default: Some(FRAMEWORK_ROOT.to_string()),
        named: used_hooks(hooks),
        source: FRAMEWORK_MODULE.to_string(),
    }]
}

/// One declaration per `{from, default?, named?}` entry, in input order.
pub fn build_imports(entries: &[Node]) -> Vec<ImportDecl> {
    entries
        .iter()
        .filter_map(|entry| {
            let Some(source) = entry.get("from").and_then(Node::as_str) else {
                debug!(?entry, "import entry without a `from` module; skipping");
                return None;
            };
            let default = entry
                .get("default")
                .and_then(Node::as_str)
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            let named = entry
                .get("named")
                .and_then(Node::as_sequence)
                .unwrap_or_default()
                .iter()
                .filter_map(Node::as_str)
                .map(str::to_string)
                .collect();
            Some(ImportDecl {
                default,
                named,
                source: source.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hooks(value: serde_json::Value) -> Vec<Node> {
        match Node::from_json(value) {
            Node::Sequence(items) => items,
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn state_hook_binds_pair() {
        let hook = Node::from_json(json!({"useState": {"variable": "count", "initialValue": 0}}));
        assert_eq!(
            build_hook(&hook),
            Stmt::ConstArrayPattern {
                names: vec!["count".to_string(), "setCount".to_string()],
                init: Expr::call(Expr::ident("useState"), vec![Expr::Number(0.0)]),
            }
        );
    }

    #[test]
    fn state_hook_without_initial_value_passes_null() {
        let hook = Node::from_json(json!({"useState": {"variable": "user"}}));
        let Stmt::ConstArrayPattern { init, .. } = build_hook(&hook) else {
            panic!("expected state pair");
        };
        assert_eq!(init, Expr::call(Expr::ident("useState"), vec![Expr::Null]));
    }

    #[test]
    fn state_hook_without_variable_degrades() {
        let hook = Node::from_json(json!({"useState": {"initialValue": 1}}));
        assert_eq!(build_hook(&hook), Stmt::Empty);
    }

    #[test]
    fn effect_hook_uses_placeholder_body() {
        let hook = Node::from_json(json!({"useEffect": {
            "effect": {"type": "JSExpression", "code": "() => { document.title = count; }"},
            "dependencies": ["count", "name"]
        }}));
        let Stmt::Expr(Expr::Call { callee, args }) = build_hook(&hook) else {
            panic!("expected effect call");
        };
        assert_eq!(*callee, Expr::ident("useEffect"));
        assert_eq!(args.len(), 2);
        let Expr::Arrow { body: ArrowBody::Block(stmts), .. } = &args[0] else {
            panic!("expected arrow with block");
        };
        assert_eq!(
            stmts[0],
            Stmt::Expr(Expr::call(
                Expr::member(Expr::ident("console"), "log"),
                vec![Expr::str("Effect running")]
            ))
        );
        assert_eq!(
            args[1],
            Expr::Array(vec![Expr::ident("count"), Expr::ident("name")])
        );
    }

    #[test]
    fn effect_dependencies_are_not_reparsed() {
        let hook = Node::from_json(json!({"useEffect": {"dependencies": ["props.id"]}}));
        let Stmt::Expr(Expr::Call { args, .. }) = build_hook(&hook) else {
            panic!("expected effect call");
        };
        assert_eq!(args[1], Expr::Array(vec![Expr::ident("props.id")]));
    }

    #[test]
    fn unknown_hook_is_empty_statement() {
        let hook = Node::from_json(json!({"useMemo": {"value": 1}}));
        assert_eq!(build_hook(&hook), Stmt::Empty);
        assert_eq!(build_hook(&Node::from("useState")), Stmt::Empty);
    }

    #[test]
    fn setter_names() {
        assert_eq!(setter_name("count"), "setCount");
        assert_eq!(setter_name("isOpen"), "setIsOpen");
        assert_eq!(setter_name("x"), "setX");
    }

    #[test]
    fn used_hooks_dedup_in_first_seen_order() {
        let list = hooks(json!([
            {"useState": {"variable": "a"}},
            {"useEffect": {}},
            {"useState": {"variable": "b"}}
        ]));
        assert_eq!(used_hooks(&list), vec!["useState", "useEffect"]);
    }

    #[test]
    fn default_imports_for_stateless_component() {
        assert_eq!(
            default_imports(&[]),
            vec![ImportDecl {
                default: Some("React".to_string()),
                named: vec![],
                source: "react".to_string(),
            }]
        );
    }

    #[test]
    fn explicit_imports_keep_order_and_shape() {
        let entries = hooks(json!([
            {"from": "react", "default": "React", "named": ["useState", "useEffect"]},
            {"from": "./utils", "default": "helper"},
            {"from": "lodash", "named": ["map", "filter"]},
            {"from": "./styles.css"},
            {"default": "Orphan"}
        ]));
        let imports = build_imports(&entries);
        assert_eq!(imports.len(), 4);
        assert_eq!(imports[0].named, vec!["useState", "useEffect"]);
        assert_eq!(imports[1].default.as_deref(), Some("helper"));
        assert!(imports[1].named.is_empty());
        assert_eq!(imports[2].default, None);
        assert_eq!(imports[3].source, "./styles.css");
        assert!(imports[3].default.is_none() && imports[3].named.is_empty());
    }
}
