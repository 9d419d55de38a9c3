//! Error types for loading YSX documents.

use thiserror::Error;

/// An error raised while loading a YSX document.
///
/// This is the only error the pipeline surfaces; the compiler core never fails.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("YSX Parse Error: {message}")]
pub struct SchemaError {
    pub message: String,
    pub line: Option<usize>,
    pub col: Option<usize>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The text is not well-formed YAML.
    Syntax,
    /// The root value is not a mapping.
    InvalidRoot,
    /// A mandatory top-level key is absent.
    MissingKey(String),
}

impl SchemaError {
    pub fn syntax(message: impl Into<String>, line: Option<usize>, col: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            col,
            kind: ErrorKind::Syntax,
        }
    }

    pub fn invalid_root() -> Self {
        Self {
            message: "Invalid YSX: Root must be an object".to_string(),
            line: None,
            col: None,
            kind: ErrorKind::InvalidRoot,
        }
    }

    pub fn missing_key(key: &str) -> Self {
        Self {
            message: format!("Invalid YSX: Missing required \"{key}\" key"),
            line: None,
            col: None,
            kind: ErrorKind::MissingKey(key.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        SchemaError::syntax(
            err.to_string(),
            location.as_ref().map(|l| l.line()),
            location.as_ref().map(|l| l.column()),
        )
    }
}
