//! Transpile options — optional defaults loaded from ~/.ysx/config.yaml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options recognized by the transpiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileOptions {
    /// Emit TypeScript surface syntax (type annotations) instead of plain JavaScript.
    #[serde(default, alias = "targetTypeAnnotations")]
    pub typescript: bool,
}

/// Get the user config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ysx").join("config.yaml"))
}

impl TranspileOptions {
    /// Load defaults from ~/.ysx/config.yaml.
    /// Returns None if the file doesn't exist or doesn't parse.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Option<Self> {
        serde_yaml::from_str(content).ok()
    }

    /// Apply a command-line choice on top of these options. `None` keeps the loaded value.
    pub fn with_typescript(mut self, typescript: Option<bool>) -> Self {
        if let Some(typescript) = typescript {
            self.typescript = typescript;
        }
        self
    }
}
