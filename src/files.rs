//! File-level transpilation — read a `.ysx` file, write the generated module.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::Transpiler;
use crate::config::TranspileOptions;
use crate::document::{Loader, Node};
use crate::error::Error;

const SOURCE_EXTENSION: &str = "ysx";

/// Default output path: the input with its extension swapped for `.jsx` / `.tsx`.
pub fn default_output_path(input: &Path, options: &TranspileOptions) -> PathBuf {
    let extension = if options.typescript { "tsx" } else { "jsx" };
    input.with_extension(extension)
}

/// Load a document from a file.
pub fn load_file(input: &Path) -> Result<Node, Error> {
    let source = std::fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    Ok(Loader::parse(&source)?)
}

/// Transpile YAML text straight to source text.
pub fn transpile_source(source: &str, options: &TranspileOptions) -> Result<String, Error> {
    let doc = Loader::parse(source)?;
    Ok(Transpiler::new(options.clone()).transpile(&doc))
}

/// Transpile `input` and write the result, creating parent directories as needed.
///
/// Returns the path written to.
pub fn transpile_file(
    input: &Path,
    output: Option<&Path>,
    options: &TranspileOptions,
) -> Result<PathBuf, Error> {
    if input.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
        debug!(input = %input.display(), "input does not have a .ysx extension");
    }
    let doc = load_file(input)?;
    let code = Transpiler::new(options.clone()).transpile(&doc);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, options));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(&output, format!("{code}\n")).map_err(|e| Error::io(&output, e))?;
    Ok(output)
}
