//! String interpolation — `"Hello {name}"` → `` `Hello ${name}` ``.
//!
//! Brace spans are matched non-greedily with no nesting: `{` followed by one
//! or more non-`}` characters and a closing `}`. Each span's inner text goes
//! through the micro-parser.

use super::ast::{Expr, TemplateElement};
use super::expr::parse_expression;

/// Lower a plain string into a string literal or a template literal.
pub fn interpolate(text: &str) -> Expr {
    if !text.contains('{') {
        return Expr::str(text);
    }

    let mut quasis = Vec::new();
    let mut exprs = Vec::new();
    let mut last = 0;
    for (start, end) in brace_spans(text) {
        quasis.push(TemplateElement {
            raw: text[last..start].to_string(),
            tail: false,
        });
        exprs.push(parse_expression(&text[start + 1..end - 1]));
        last = end;
    }

    if exprs.is_empty() {
        return Expr::str(text);
    }

    quasis.push(TemplateElement {
        raw: text[last..].to_string(),
        tail: true,
    });
    Expr::Template { quasis, exprs }
}

/// Byte ranges `start..end` of each `{...}` span, braces included.
fn brace_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let open = from + offset;
        match text[open + 1..].find('}') {
            Some(0) => from = open + 1,
            Some(len) => {
                let end = open + 1 + len + 1;
                spans.push((open, end));
                from = end;
            }
            None => break,
        }
    }
    spans
}
