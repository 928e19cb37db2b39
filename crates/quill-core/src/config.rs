//! Rendering configuration
//!
//! Configuration is an explicit value handed to the engine, never global
//! state. It can be built in code or loaded from a YAML file:
//!
//! ```yaml
//! stripWhitespaceOnEmptyLines: false
//! indentUnit: "\t"
//! maxNestingDepth: 64
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default indent unit used by buffer-level indentation
pub const DEFAULT_INDENT_UNIT: &str = "    ";

/// Default ceiling on template nesting
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderConfig {
    /// Reduce lines made only of whitespace to empty lines
    pub strip_whitespace_on_empty_lines: bool,

    /// One level of buffer indentation
    pub indent_unit: String,

    /// Maximum depth of nested and included templates
    ///
    /// Sequences do not add a level of their own: a template inside a
    /// sequence counts once, like any other nested template.
    pub max_nesting_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strip_whitespace_on_empty_lines: true,
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_whitespace_on_empty_lines(mut self, strip: bool) -> Self {
        self.strip_whitespace_on_empty_lines = strip;
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Parse from a YAML string; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
