//! Full pipeline integration tests — YAML text → Document Tree → module source.

use serde_json::json;

use ysx::codegen::ast::{Expr, Stmt, TemplateElement};
use ysx::codegen::interpolate::interpolate;
use ysx::document::ErrorKind;
use ysx::{Loader, Node, TranspileOptions, Transpiler};

/// Helper: load YAML and transpile it with default options.
fn transpile_yaml(src: &str) -> String {
    let doc = Loader::parse(src).expect("load failed");
    Transpiler::default().transpile(&doc)
}

fn count_of(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn counter_src() -> &'static str {
    r#"
version: 1.0
name: Counter
props:
  label: !ts string
hooks:
  - useState:
      variable: count
      initialValue: 0
  - useEffect:
      effect: !!js |
        () => { document.title = `Count: ${count}`; }
      dependencies: [count]
  - useState:
      variable: step
      initialValue: 1
render:
  div:
    className: counter
    children:
      - h1: "{props.label}"
      - p: "Count: {count}"
      - button:
          onClick: !js () => setCount(count + step)
          children: Increment
"#
}

// =============================================================================
// Loader boundary
// =============================================================================

#[test]
fn missing_render_key_is_reported_by_name() {
    let err = Loader::parse("name: Lonely\nprops:\n  title: Hello\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingKey("render".to_string()));
    assert!(err.to_string().contains("\"render\""));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = Loader::parse("name: Bad\nrender: [\n  oops\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.to_string().starts_with("YSX Parse Error"));
}

// =============================================================================
// Module shape
// =============================================================================

#[test]
fn output_has_one_function_and_one_default_export() {
    let code = transpile_yaml(counter_src());
    assert_eq!(count_of(&code, "function Counter(props)"), 1);
    assert_eq!(count_of(&code, "function "), 1);
    assert_eq!(count_of(&code, "export default Counter;"), 1);
    assert!(code.ends_with("export default Counter;"));
}

#[test]
fn counter_component_end_to_end() {
    let code = transpile_yaml(counter_src());
    let expected = r#"import React, { useState, useEffect } from "react";
function Counter(props) {
  const [count, setCount] = useState(0);
  useEffect(() => {
    console.log("Effect running");
  }, [count]);
  const [step, setStep] = useState(1);
  return React.createElement("div", {
    className: "counter"
  }, React.createElement("h1", null, `${props.label}`), React.createElement("p", null, `Count: ${count}`), React.createElement("button", {
    onClick: () => setCount(count + step)
  }, "Increment"));
}
export default Counter;"#;
    assert_eq!(code, expected);
}

#[test]
fn typescript_output_annotates_declared_props() {
    let doc = Loader::parse(counter_src()).unwrap();
    let code = Transpiler::new(TranspileOptions { typescript: true }).transpile(&doc);
    assert!(code.contains("function Counter(props: { label: string; }) {"));
}

#[test]
fn stateless_document_imports_only_the_framework_root() {
    let code = transpile_yaml("render:\n  span: hi\n");
    assert!(code.starts_with("import React from \"react\";\nfunction Component(props) {"));
}

#[test]
fn explicit_imports_override_defaults_in_order() {
    let code = transpile_yaml(
        r#"
name: MultiImportComponent
imports:
  - from: react
    default: React
    named: [useState, useEffect]
  - from: ./utils
    default: helper
  - from: lodash
    named: [map, filter]
hooks:
  - useState:
      variable: open
      initialValue: false
render:
  div: Test
"#,
    );
    let imports: Vec<&str> = code.lines().take_while(|l| l.starts_with("import")).collect();
    assert_eq!(
        imports,
        vec![
            "import React, { useState, useEffect } from \"react\";",
            "import helper from \"./utils\";",
            "import { map, filter } from \"lodash\";",
        ]
    );
    assert!(code.contains("const [open, setOpen] = useState(false);"));
}

#[test]
fn nested_elements() {
    let code = transpile_yaml(
        r#"
name: NestedComponent
render:
  div:
    children:
      - h1: Title
      - p: Paragraph
"#,
    );
    assert!(code.contains(
        "React.createElement(\"div\", null, React.createElement(\"h1\", null, \"Title\"), React.createElement(\"p\", null, \"Paragraph\"))"
    ));
}

#[test]
fn scalar_element_configs() {
    let code = transpile_yaml("render:\n  div:\n    children:\n      - p: 5\n      - p: 0\n      - p: \"Press !!js now\"\n");
    assert!(code.contains(
        "React.createElement(\"div\", null, React.createElement(\"p\", null), React.createElement(\"p\", null, null), React.createElement(\"p\", null, \"Press !!js now\"))"
    ));
}

#[test]
fn component_tags_and_unknown_hooks() {
    let code = transpile_yaml(
        r#"
name: Page
hooks:
  - useMemo:
      value: 1
render:
  Layout:
    title: Home
    children: !js props.children
"#,
    );
    assert!(code.contains("import React, { useMemo } from \"react\";"));
    assert!(code.contains("\n  ;\n"));
    assert!(code.contains("React.createElement(Layout, {\n    title: \"Home\"\n  }, props.children)"));
}

// =============================================================================
// In-memory trees and properties
// =============================================================================

#[test]
fn json_built_tree_matches_yaml_loaded_tree() {
    let from_json = Node::from_json(json!({
        "name": "Greeting",
        "render": {"p": {"children": "Hello {name}"}}
    }));
    let from_yaml = Loader::parse("name: Greeting\nrender:\n  p:\n    children: Hello {name}\n").unwrap();
    assert_eq!(from_json, from_yaml);

    let transpiler = Transpiler::default();
    assert_eq!(transpiler.transpile(&from_json), transpiler.transpile(&from_yaml));
}

#[test]
fn hello_name_interpolation() {
    assert_eq!(
        interpolate("Hello {name}"),
        Expr::Template {
            quasis: vec![
                TemplateElement {
                    raw: "Hello ".to_string(),
                    tail: false,
                },
                TemplateElement {
                    raw: String::new(),
                    tail: true,
                },
            ],
            exprs: vec![Expr::ident("name")],
        }
    );
}

#[test]
fn transpile_is_idempotent() {
    let doc = Loader::parse(counter_src()).unwrap();
    let transpiler = Transpiler::default();
    let first = transpiler.transpile(&doc);
    let second = transpiler.transpile(&doc);
    assert_eq!(first, second);
}

#[test]
fn odd_shapes_degrade_instead_of_failing() {
    let doc = Node::from_json(json!({
        "name": "Odd",
        "hooks": [42, {"useState": "nope"}, {}],
        "imports": [{"default": "NoSource"}],
        "render": {"div": {"children": [null, {}, 3, true]}}
    }));
    let module = Transpiler::default().compile(&doc);
    assert!(module.imports.is_empty());
    assert_eq!(&module.function.body[..3], &[Stmt::Empty, Stmt::Empty, Stmt::Empty]);

    let code = Transpiler::default().transpile(&doc);
    assert!(code.contains("React.createElement(\"div\", null, null, null, 3, true)"));
    assert!(code.ends_with("export default Odd;"));
}

#[test]
fn concurrent_transpiles_share_nothing() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let doc = Node::from_json(json!({"name": format!("C{i}"), "render": {"b": "{x}"}}));
                Transpiler::default().transpile(&doc)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let code = handle.join().unwrap();
        assert!(code.contains(&format!("function C{i}(props)")));
    }
}
