//! CLI commands

pub mod check;
pub mod inspect;
pub mod render;

use std::path::{Path, PathBuf};

use clap::Args;
use quill_core::{RenderConfig, TemplateDocument};
use quill_engine::Engine;
use tracing::debug;

use crate::error::{CliError, Result};

/// Engine options shared by `render` and `check`
#[derive(Args, Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render config file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep whitespace on otherwise empty lines
    #[arg(long)]
    pub keep_whitespace: bool,

    /// Maximum nesting depth of templates
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl RenderOptions {
    /// Resolve the render config: file first, then command line overrides
    pub fn to_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                RenderConfig::from_yaml_file(path).map_err(|e| CliError::document(path, e))?
            }
            None => RenderConfig::default(),
        };

        if self.keep_whitespace {
            config.strip_whitespace_on_empty_lines = false;
        }
        if let Some(depth) = self.max_depth {
            config.max_nesting_depth = depth;
        }

        debug!(?config, "resolved render config");
        Ok(config)
    }

    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::new(self.to_config()?))
    }
}

/// Load a template document, reporting the path on failure
pub fn load_document(path: &Path) -> Result<TemplateDocument> {
    let document = TemplateDocument::from_file(path).map_err(|e| CliError::document(path, e))?;
    debug!(
        path = %path.display(),
        templates = document.templates().count(),
        outputs = document.outputs().count(),
        "loaded template document"
    );
    Ok(document)
}
