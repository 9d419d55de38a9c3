//! Expression micro-parser — snippet text → expression AST.
//!
//! Not a grammar. Snippets run through an ordered table of recognizers and the
//! first one that matches builds the fragment. Anything unrecognized becomes a
//! bare identifier carrying the text as-is, so this stage never fails.
//!
//! Known limits, kept on purpose:
//! - call arguments are split on every comma, nested or quoted;
//! - a binary expression binds only a single leading identifier on the left;
//! - arrow functions with block bodies produce an empty block.

use tracing::debug;

use super::ast::{ArrowBody, BinOp, Expr};

/// Parameter name whose field accesses become member expressions.
pub const PROPS_PARAM: &str = "props";

type Recognizer = fn(&str) -> Option<Expr>;

/// Tried top to bottom; first match wins.
const RECOGNIZERS: &[(&str, Recognizer)] = &[
    ("member", match_member),
    ("call", match_call),
    ("binary", match_binary),
    ("identifier", match_identifier),
    ("string", match_string),
    ("integer", match_integer),
];

/// Parse a snippet that may be an arrow function.
pub fn parse_expression(code: &str) -> Expr {
    let trimmed = code.trim();
    if trimmed.starts_with("()") || (trimmed.starts_with('(') && trimmed.contains("=>")) {
        if let Some(arrow) = match_arrow(trimmed) {
            return arrow;
        }
    }
    parse_operand(trimmed)
}

/// Parse a snippet with the non-arrow recognizers.
pub fn parse_operand(text: &str) -> Expr {
    for (name, recognize) in RECOGNIZERS {
        if let Some(expr) = recognize(text) {
            debug!(recognizer = name, text, "micro-parser match");
            return expr;
        }
    }
    debug!(text, "no recognizer matched; emitting bare identifier");
    Expr::Ident(text.to_string())
}

/// `(<params>) => <body>`
fn match_arrow(text: &str) -> Option<Expr> {
    let inner = text.strip_prefix('(')?;
    let close = inner.find(')')?;
    let params_src = &inner[..close];
    let body = inner[close + 1..].trim_start().strip_prefix("=>")?;
    if body.is_empty() {
        return None;
    }
    let body = body.trim();

    let params = params_src
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let body = if body.starts_with('{') {
        ArrowBody::Block(Vec::new())
    } else {
        ArrowBody::Expr(Box::new(parse_operand(body)))
    };

    Some(Expr::Arrow { params, body })
}

/// `props.<field>`
fn match_member(text: &str) -> Option<Expr> {
    let field = text.strip_prefix(PROPS_PARAM)?.strip_prefix('.')?;
    Some(Expr::member(Expr::ident(PROPS_PARAM), field))
}

/// `name(<args>)`
fn match_call(text: &str) -> Option<Expr> {
    let name = leading_identifier(text)?;
    let open = name.len();
    if !text[open..].starts_with('(') {
        return None;
    }
    let close = text.rfind(')')?;
    if close <= open + 1 {
        return None;
    }
    let args = text[open + 1..close]
        .split(',')
        .map(|arg| parse_operand(arg.trim()))
        .collect();
    Some(Expr::call(Expr::ident(name), args))
}

/// `name <op> <rest>` for `+ - * /`
fn match_binary(text: &str) -> Option<Expr> {
    let name = leading_identifier(text)?;
    let rest = text[name.len()..].trim_start();
    let mut chars = rest.chars();
    let op = chars.next().and_then(BinOp::from_char)?;
    let right = chars.as_str().trim_start();
    if right.is_empty() || right.contains(is_line_terminator) {
        return None;
    }
    Some(Expr::Binary {
        op,
        left: Box::new(Expr::ident(name)),
        right: Box::new(parse_operand(right.trim())),
    })
}

fn match_identifier(text: &str) -> Option<Expr> {
    match leading_identifier(text) {
        Some(name) if name.len() == text.len() => Some(Expr::ident(name)),
        _ => None,
    }
}

/// Quoted with `'`, `"` or a backtick. The first and last characters are dropped.
fn match_string(text: &str) -> Option<Expr> {
    let rest = text.strip_prefix(&['\'', '"', '`'][..])?;
    let mut chars = rest.chars();
    chars.next_back();
    Some(Expr::str(chars.as_str()))
}

fn match_integer(text: &str) -> Option<Expr> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok().map(Expr::Number)
}

/// Longest prefix matching `[A-Za-z_$][A-Za-z0-9_$]*`.
pub(crate) fn leading_identifier(text: &str) -> Option<&str> {
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic() || c == '_' || c == '$'
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '$'
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    (end > 0).then(|| &text[..end])
}

pub(crate) fn is_identifier(text: &str) -> bool {
    leading_identifier(text).is_some_and(|name| name.len() == text.len())
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
