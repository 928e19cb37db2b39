//! CLI error types with exit code handling

use std::path::PathBuf;

use miette::Diagnostic;
use quill_core::CoreError;
use quill_engine::EngineError;
use thiserror::Error;

use crate::exit_codes;

/// CLI error type that carries its exit code
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Document or config file could not be loaded
    #[error("Failed to load {}", path.display())]
    #[diagnostic(code(quill::cli::document))]
    Document {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    /// Rendering failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] EngineError),

    /// Outputs that differ from their golden files
    #[error("{failed} of {total} output(s) do not match")]
    #[diagnostic(
        code(quill::cli::mismatch),
        help("Re-render with `quill render --output-dir` to refresh the golden files.")
    )]
    Mismatch { failed: usize, total: usize },

    /// Invalid arguments
    #[error("{message}")]
    #[diagnostic(code(quill::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Document { .. } => exit_codes::DOCUMENT_ERROR,
            CliError::Render(EngineError::Io(_)) => exit_codes::IO_ERROR,
            CliError::Render(_) => exit_codes::TEMPLATE_ERROR,
            CliError::Mismatch { .. } => exit_codes::ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
        }
    }

    /// Create a document loading error
    pub fn document(path: impl Into<PathBuf>, source: CoreError) -> Self {
        Self::Document {
            path: path.into(),
            source,
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
