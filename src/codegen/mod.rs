//! Transpiler core — Document Tree → Module AST → source text.
//!
//! Total over any tree the loader accepts: shapes it does not recognize
//! degrade to `null` literals or empty statements rather than errors.

pub mod ast;
pub mod compile;
pub mod element;
pub mod expr;
pub mod hooks;
pub mod interpolate;
pub mod printer;

pub use ast::Module;
pub use compile::{compile_document, ComponentKind};
pub use printer::{print_module, PrintOptions};

use tracing::trace;

use crate::config::TranspileOptions;
use crate::document::Node;

/// The YSX transpiler.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    options: TranspileOptions,
}

impl Transpiler {
    pub fn new(options: TranspileOptions) -> Self {
        Self { options }
    }

    /// Build the module AST. The options do not affect its shape.
    pub fn compile(&self, doc: &Node) -> Module {
        compile_document(doc)
    }

    /// Compile and print one document.
    pub fn transpile(&self, doc: &Node) -> String {
        let module = self.compile(doc);
        let source = print_module(
            &module,
            PrintOptions {
                typescript: self.options.typescript,
            },
        );
        trace!(component = %module.function.name, bytes = source.len(), "transpiled");
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transpile(value: serde_json::Value) -> String {
        Transpiler::default().transpile(&Node::from_json(value))
    }

    #[test]
    fn simple_component() {
        let code = transpile(json!({"name": "SimpleComponent", "render": {"div": {"children": "Hello World"}}}));
        assert_eq!(
            code,
            "import React from \"react\";\n\
             function SimpleComponent(props) {\n\
             \x20 return React.createElement(\"div\", null, \"Hello World\");\n\
             }\n\
             export default SimpleComponent;"
        );
    }

    #[test]
    fn counter_component() {
        let code = transpile(json!({
            "name": "Counter",
            "hooks": [{"useState": {"variable": "count", "initialValue": 0}}],
            "render": {"div": {"children": "Count"}}
        }));
        assert!(code.contains("import React, { useState } from \"react\""));
        assert!(code.contains("const [count, setCount] = useState(0);"));
    }

    #[test]
    fn arrow_function_attribute() {
        let code = transpile(json!({
            "name": "ButtonComponent",
            "render": {"button": {
                "onClick": {"type": "JSExpression", "code": "() => console.log(\"clicked\")"},
                "children": "Click"
            }}
        }));
        assert!(code.contains("onClick: () => console.log(\"clicked\")"));
    }

    #[test]
    fn style_objects() {
        let code = transpile(json!({
            "name": "StyledComponent",
            "render": {"div": {"style": {"color": "red", "fontSize": "16px"}, "children": "Styled"}}
        }));
        assert!(code.contains("color: \"red\""));
        assert!(code.contains("fontSize: \"16px\""));
    }

    #[test]
    fn typescript_only_changes_surface_syntax() {
        let doc = Node::from_json(json!({"name": "T", "render": "x"}));
        let js = Transpiler::default();
        let ts = Transpiler::new(TranspileOptions { typescript: true });
        assert_eq!(js.compile(&doc), ts.compile(&doc));
        assert!(ts.transpile(&doc).contains("function T(props: any)"));
        assert!(js.transpile(&doc).contains("function T(props)"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let doc = Node::from_json(json!({
            "hooks": [{"useState": {"variable": "n", "initialValue": 1}}],
            "render": {"p": "{n} items"}
        }));
        let transpiler = Transpiler::default();
        assert_eq!(transpiler.transpile(&doc), transpiler.transpile(&doc));
    }
}
