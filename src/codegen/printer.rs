//! Code printer — Module AST → JavaScript / TypeScript source text.
//!
//! Formatting: double-quoted strings, two-space indentation, one statement
//! per line, multi-line object literals, everything else inline.

use std::fmt::{self, Write};

use super::ast::*;
use super::expr::is_identifier;

/// Surface-syntax switches for the printer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Emit type annotations on parameters.
    pub typescript: bool,
}

/// Render a module as source text (no trailing newline).
pub fn print_module(module: &Module, options: PrintOptions) -> String {
    ModuleWriter { module, options }.to_string()
}

/// Render a single expression at indentation level zero.
pub fn print_expr(expr: &Expr) -> String {
    ExprWriter { expr, indent: 0 }.to_string()
}

// ============================================================================
// MODULE
// ============================================================================

struct ModuleWriter<'a> {
    module: &'a Module,
    options: PrintOptions,
}

impl fmt::Display for ModuleWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in &self.module.imports {
            writeln!(f, "{}", ImportWriter { import })?;
        }
        writeln!(
            f,
            "{}",
            FunctionWriter {
                function: &self.module.function,
                options: self.options,
            }
        )?;
        write!(f, "export default {};", self.module.default_export)
    }
}

struct ImportWriter<'a> {
    import: &'a ImportDecl,
}

impl fmt::Display for ImportWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let import = self.import;
        write!(f, "import ")?;
        match (&import.default, import.named.is_empty()) {
            (None, true) => {}
            (Some(default), true) => write!(f, "{default} from ")?,
            (None, false) => write!(f, "{{ {} }} from ", import.named.join(", "))?,
            (Some(default), false) => write!(f, "{default}, {{ {} }} from ", import.named.join(", "))?,
        }
        write!(f, "{};", StrLit(&import.source))
    }
}

struct FunctionWriter<'a> {
    function: &'a FunctionDecl,
    options: PrintOptions,
}

impl fmt::Display for FunctionWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}(", self.function.name)?;
        for (i, param) in self.function.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
            if self.options.typescript {
                match &param.annotation {
                    Some(annotation) => write!(f, ": {}", TypeWriter { annotation })?,
                    None => write!(f, ": any")?,
                }
            }
        }
        write!(
            f,
            ") {}",
            BlockWriter {
                stmts: &self.function.body,
                indent: 0,
            }
        )
    }
}

struct TypeWriter<'a> {
    annotation: &'a TypeAnnotation,
}

impl fmt::Display for TypeWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.annotation {
            TypeAnnotation::Raw(ty) => write!(f, "{ty}"),
            TypeAnnotation::Object(fields) if fields.is_empty() => write!(f, "{{}}"),
            TypeAnnotation::Object(fields) => {
                write!(f, "{{ ")?;
                for (key, ty) in fields {
                    write!(f, "{}: {ty}; ", PropertyKey(key))?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// STATEMENT
// ============================================================================

struct BlockWriter<'a> {
    stmts: &'a [Stmt],
    indent: usize,
}

impl fmt::Display for BlockWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() {
            return write!(f, "{{}}");
        }
        writeln!(f, "{{")?;
        for stmt in self.stmts {
            writeln!(
                f,
                "{}",
                StmtWriter {
                    stmt,
                    indent: self.indent + 1,
                }
            )?;
        }
        write!(f, "{}}}", pad(self.indent))
    }
}

struct StmtWriter<'a> {
    stmt: &'a Stmt,
    indent: usize,
}

impl fmt::Display for StmtWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = self.indent;
        write!(f, "{}", pad(indent))?;
        match self.stmt {
            Stmt::ConstArrayPattern { names, init } => {
                write!(f, "const [{}] = {};", names.join(", "), ExprWriter { expr: init, indent })
            }
            Stmt::Expr(expr) => write!(f, "{};", ExprWriter { expr, indent }),
            Stmt::Return(expr) => write!(f, "return {};", ExprWriter { expr, indent }),
            Stmt::Empty => write!(f, ";"),
        }
    }
}

// ============================================================================
// EXPRESSION
// ============================================================================

struct ExprWriter<'a> {
    expr: &'a Expr,
    indent: usize,
}

impl ExprWriter<'_> {
    fn nested<'b>(&self, expr: &'b Expr) -> ExprWriter<'b> {
        ExprWriter {
            expr,
            indent: self.indent,
        }
    }

    /// Binary operand, parenthesized when it would otherwise re-associate.
    fn operand(&self, f: &mut fmt::Formatter<'_>, expr: &Expr, parent: BinOp, right: bool) -> fmt::Result {
        let needs_parens = match expr {
            Expr::Binary { op, .. } => {
                op.precedence() < parent.precedence() || (right && op.precedence() == parent.precedence())
            }
            Expr::Arrow { .. } => true,
            _ => false,
        };
        if needs_parens {
            write!(f, "({})", self.nested(expr))
        } else {
            write!(f, "{}", self.nested(expr))
        }
    }
}

impl fmt::Display for ExprWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Null => write!(f, "null"),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Number(n) => write!(f, "{}", NumLit(*n)),
            Expr::Str(s) => write!(f, "{}", StrLit(s)),
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Template { quasis, exprs } => {
                write!(f, "`")?;
                for (i, quasi) in quasis.iter().enumerate() {
                    write_template_raw(f, &quasi.raw)?;
                    if let Some(expr) = exprs.get(i) {
                        write!(f, "${{{}}}", self.nested(expr))?;
                    }
                }
                write!(f, "`")
            }
            Expr::Member { object, property } => {
                match object.as_ref() {
                    Expr::Ident(_) | Expr::Member { .. } | Expr::Call { .. } => {
                        write!(f, "{}", self.nested(object))?
                    }
                    _ => write!(f, "({})", self.nested(object))?,
                }
                write!(f, ".{property}")
            }
            Expr::Call { callee, args } => {
                match callee.as_ref() {
                    Expr::Arrow { .. } | Expr::Binary { .. } => write!(f, "({})", self.nested(callee))?,
                    _ => write!(f, "{}", self.nested(callee))?,
                }
                write!(f, "(")?;
                self.comma_list(f, args)?;
                write!(f, ")")
            }
            Expr::Binary { op, left, right } => {
                self.operand(f, left, *op, false)?;
                write!(f, " {} ", op.symbol())?;
                self.operand(f, right, *op, true)
            }
            Expr::Arrow { params, body } => {
                match params.as_slice() {
                    [single] => write!(f, "{single}")?,
                    _ => write!(f, "({})", params.join(", "))?,
                }
                write!(f, " => ")?;
                match body {
                    ArrowBody::Block(stmts) => write!(
                        f,
                        "{}",
                        BlockWriter {
                            stmts,
                            indent: self.indent,
                        }
                    ),
                    ArrowBody::Expr(expr) if matches!(expr.as_ref(), Expr::Object(_)) => {
                        write!(f, "({})", self.nested(expr))
                    }
                    ArrowBody::Expr(expr) => write!(f, "{}", self.nested(expr)),
                }
            }
            Expr::Array(items) => {
                write!(f, "[")?;
                self.comma_list(f, items)?;
                write!(f, "]")
            }
            Expr::Object(props) if props.is_empty() => write!(f, "{{}}"),
            Expr::Object(props) => {
                writeln!(f, "{{")?;
                let inner = self.indent + 1;
                for (i, (key, value)) in props.iter().enumerate() {
                    let value = ExprWriter {
                        expr: value,
                        indent: inner,
                    };
                    write!(f, "{}{}: {}", pad(inner), PropertyKey(key), value)?;
                    if i + 1 < props.len() {
                        write!(f, ",")?;
                    }
                    writeln!(f)?;
                }
                write!(f, "{}}}", pad(self.indent))
            }
        }
    }
}

impl ExprWriter<'_> {
    /// Comma-separated, inline.
    fn comma_list(&self, f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.nested(item))?;
        }
        Ok(())
    }
}

// ============================================================================
// LITERALS
// ============================================================================

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

struct PropertyKey<'a>(&'a str);

impl fmt::Display for PropertyKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_identifier(self.0) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}", StrLit(self.0))
        }
    }
}

struct NumLit(f64);

impl fmt::Display for NumLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        if n.is_nan() {
            write!(f, "NaN")
        } else if n.is_infinite() {
            write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
        } else if n.fract() == 0.0 && n.abs() < 1e21 {
            write!(f, "{n:.0}")
        } else {
            write!(f, "{n}")
        }
    }
}

struct StrLit<'a>(&'a str);

impl fmt::Display for StrLit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
                c if (c as u32) < 0x20 => write!(f, "\\x{:02X}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')
    }
}

fn write_template_raw(f: &mut fmt::Formatter<'_>, raw: &str) -> fmt::Result {
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => f.write_str("\\`")?,
            '\\' => f.write_str("\\\\")?,
            '$' if chars.peek() == Some(&'{') => f.write_str("\\$")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}
