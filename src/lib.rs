//! YSX — compiles declarative YAML component descriptions into React
//! function-component modules.
//!
//! ```text
//! YAML text ──Loader──▶ Node ──Transpiler──▶ Module AST ──printer──▶ source text
//! ```

pub mod codegen;
pub mod config;
pub mod document;
pub mod error;
pub mod files;

pub use codegen::Transpiler;
pub use config::TranspileOptions;
pub use document::{Loader, Node, SchemaError};
pub use error::Error;
