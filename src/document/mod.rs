//! Document loader — YAML text → Document Tree.
//!
//! Honors the `!js` (raw code) and `!ts` (type annotation) scalar tags, in both
//! their local (`!js`) and secondary-handle (`!!js`) spellings, and checks the
//! minimal schema: the root is a mapping with a `render` key.

pub mod error;
pub mod node;

use std::borrow::Cow;

pub use error::{ErrorKind, SchemaError};
pub use node::{ExprKind, Mapping, Node, Number, TaggedExpr};

use tracing::trace;

/// The top-level key every document must carry.
pub const RENDER_KEY: &str = "render";

/// The YSX document loader.
pub struct Loader;

impl Loader {
    /// Parse YAML text into a validated Document Tree.
    pub fn parse(source: &str) -> Result<Node, SchemaError> {
        let normalized = normalize_tag_handles(source);
        let value: serde_yaml::Value = serde_yaml::from_str(&normalized)?;
        let node = Node::from_yaml(value);
        Self::validate(&node)?;
        trace!(keys = node.as_mapping().map_or(0, Mapping::len), "document loaded");
        Ok(node)
    }

    /// Check the minimal schema on a tree built by any means.
    pub fn validate(node: &Node) -> Result<(), SchemaError> {
        let root = node.as_mapping().ok_or_else(SchemaError::invalid_root)?;
        match root.get(RENDER_KEY) {
            None | Some(Node::Null) => Err(SchemaError::missing_key(RENDER_KEY)),
            Some(_) => Ok(()),
        }
    }
}

/// Rewrite `!!js` / `!!ts` to `!js` / `!ts` where they stand in tag position.
///
/// The secondary handle expands to the `tag:yaml.org,2002:` namespace, which
/// the YAML layer folds into plain strings; the local form survives as a tag.
/// Quoted scalars, comments and block-scalar bodies are copied untouched.
fn normalize_tag_handles(source: &str) -> Cow<'_, str> {
    if !source.contains("!!js") && !source.contains("!!ts") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut quote = None;
    let mut block_parent: Option<usize> = None;
    for line in source.split_inclusive('\n') {
        if let Some(parent) = block_parent {
            if line.trim().is_empty() || indentation(line) > parent {
                out.push_str(line);
                continue;
            }
            block_parent = None;
        }
        block_parent = scan_line(line, &mut quote, &mut out);
    }
    Cow::Owned(out)
}

/// Copy one line into `out`, rewriting tag handles outside quotes and comments.
///
/// `quote` carries an open flow-quoted scalar across lines. Returns the parent
/// indentation when the line opens a block scalar.
fn scan_line(line: &str, quote: &mut Option<u8>, out: &mut String) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut last = 0;
    let mut end = bytes.len();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match *quote {
            Some(b'"') => match b {
                b'\\' => i += 1,
                b'"' => *quote = None,
                _ => {}
            },
            Some(_) => {
                if b == b'\'' {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 1;
                    } else {
                        *quote = None;
                    }
                }
            }
            None => {
                if b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
                    end = i;
                    break;
                }
                if matches!(b, b'"' | b'\'') && at_value_start(bytes, i) {
                    *quote = Some(b);
                } else if is_secondary_handle(bytes, i) && at_value_start(bytes, i) {
                    out.push_str(&line[last..i]);
                    out.push('!');
                    last = i + 2;
                    i += 4;
                    continue;
                }
            }
        }
        i += 1;
    }
    out.push_str(&line[last..]);

    if quote.is_some() {
        return None;
    }
    block_scalar_parent(&line[..end])
}

fn is_secondary_handle(bytes: &[u8], i: usize) -> bool {
    let rest = &bytes[i..];
    (rest.starts_with(b"!!js") || rest.starts_with(b"!!ts"))
        && rest.get(4).map_or(true, |b| b.is_ascii_whitespace())
}

/// Whether a node can begin at `i`: line start, after `:` `?` `,` `[` `{`,
/// or after a sequence dash.
fn at_value_start(bytes: &[u8], i: usize) -> bool {
    let mut j = i;
    while j > 0 && matches!(bytes[j - 1], b' ' | b'\t') {
        j -= 1;
    }
    if j == 0 {
        return true;
    }
    match bytes[j - 1] {
        b':' | b'?' | b',' | b'[' | b'{' => true,
        b'-' => j < i && bytes[..j - 1].iter().all(|b| matches!(b, b' ' | b'\t' | b'-')),
        _ => false,
    }
}

/// Parent indentation when `content` ends with a block-scalar header
/// (`|`, `>-`, `|2`, optionally after a tag).
fn block_scalar_parent(content: &str) -> Option<usize> {
    let content = content.trim_end();
    let start = content.rfind([' ', '\t']).map_or(0, |p| p + 1);
    let mut indicator = content[start..].chars();
    if !matches!(indicator.next(), Some('|' | '>'))
        || !indicator.all(|c| matches!(c, '+' | '-' | '1'..='9'))
    {
        return None;
    }

    let before = content[..start].trim_end();
    let node_start = match before.rfind([' ', '\t']).map_or(0, |p| p + 1) {
        tag if before[tag..].starts_with('!') => tag,
        _ => start,
    };
    let bytes = content.as_bytes();
    if !at_value_start(bytes, node_start) {
        return None;
    }

    let key = content[..node_start].trim_end();
    if key.ends_with(':') {
        Some(key_column(content))
    } else {
        Some(indentation(content))
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Column of the first node on the line, past any `- ` sequence markers.
fn key_column(line: &str) -> usize {
    let bytes = line.as_bytes();
    let mut i = indentation(line);
    while bytes.get(i) == Some(&b'-') && matches!(bytes.get(i + 1), Some(b' ' | b'\t')) {
        i += 1;
        while matches!(bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
    }
    i
}
