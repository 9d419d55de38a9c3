//! Module AST for the generated component source.
//!
//! Only the constructs the compiler emits are modeled: imports, one function
//! declaration, and a default export.

/// A complete generated module.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub imports: Vec<ImportDecl>,
    pub function: FunctionDecl,
    /// Name referenced by `export default`.
    pub default_export: String,
}

/// `import Default, { a, b } from "source";`
///
/// With neither binding this is a side-effect-only import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub default: Option<String>,
    pub named: Vec<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// Printed only when emitting TypeScript.
    pub annotation: Option<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// A type written out verbatim, e.g. `any`.
    Raw(String),
    /// `{ key: type; ... }`
    Object(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `const [a, b] = init;`
    ConstArrayPattern { names: Vec<String>, init: Expr },
    Expr(Expr),
    Return(Expr),
    /// `;`
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
        }
    }
}

/// One literal segment of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    pub raw: String,
    /// Set on the final segment only.
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Ident(String),
    /// `` `a${x}b` `` — `quasis.len() == exprs.len() + 1`.
    Template {
        quasis: Vec<TemplateElement>,
        exprs: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Arrow {
        params: Vec<String>,
        body: ArrowBody,
    },
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }
}

/// Result of one recursive lowering step.
///
/// `Empty` marks a sub-tree the compiler absorbed instead of failing on; the
/// parent decides how it degrades (normally to a `null` literal).
#[derive(Debug, Clone, PartialEq)]
pub enum Lowered {
    Expr(Expr),
    Empty,
}

impl Lowered {
    pub fn or_null(self) -> Expr {
        match self {
            Lowered::Expr(e) => e,
            Lowered::Empty => Expr::Null,
        }
    }
}

impl From<Expr> for Lowered {
    fn from(e: Expr) -> Self {
        Lowered::Expr(e)
    }
}
