//! Engine error types

use indexmap::IndexMap;
use miette::Diagnostic;
use quill_core::CoreError;
use thiserror::Error;

use crate::golden::GoldenDiff;

/// Main engine error type
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error(transparent)]
    #[diagnostic(code(quill::core))]
    Core(#[from] CoreError),

    #[error("Cyclic template: {}", .chain.join(" -> "))]
    #[diagnostic(
        code(quill::render::cycle),
        help("A template must not include itself, directly or through other templates.")
    )]
    CyclicTemplate { chain: Vec<String> },

    #[error("Nesting depth {depth} exceeds the limit of {limit}")]
    #[diagnostic(
        code(quill::render::depth),
        help("Raise `maxNestingDepth` if the structure is meant to be this deep.")
    )]
    NestingDepthExceeded { depth: usize, limit: usize },

    #[error("Unknown output buffer: {name}")]
    #[diagnostic(code(quill::output::unknown))]
    UnknownBuffer { name: String },

    #[error("Unknown template: {name}")]
    #[diagnostic(
        code(quill::render::include),
        help("Includes are resolved through the engine's template source.")
    )]
    UnknownTemplate { name: String },

    #[error("Output `{buffer}` does not match the expected text")]
    #[diagnostic(code(quill::output::mismatch))]
    GoldenMismatch { buffer: String, diff: GoldenDiff },

    #[error("IO error: {0}")]
    #[diagnostic(code(quill::io))]
    Io(#[from] std::io::Error),
}

/// Error kind for categorizing engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineErrorKind {
    UnsupportedValueKind,
    CyclicTemplate,
    NestingDepthExceeded,
    UnknownBuffer,
    UnknownTemplate,
    GoldenMismatch,
    Other,
}

impl EngineErrorKind {
    /// Convert to a code string for diagnostics
    pub fn to_code_string(&self) -> &'static str {
        match self {
            Self::UnsupportedValueKind => "unsupported_value_kind",
            Self::CyclicTemplate => "cyclic_template",
            Self::NestingDepthExceeded => "nesting_depth_exceeded",
            Self::UnknownBuffer => "unknown_buffer",
            Self::UnknownTemplate => "unknown_template",
            Self::GoldenMismatch => "golden_mismatch",
            Self::Other => "other",
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            Self::Core(CoreError::UnsupportedValueKind { .. }) => {
                EngineErrorKind::UnsupportedValueKind
            }
            Self::Core(CoreError::UnknownTemplate { .. }) | Self::UnknownTemplate { .. } => {
                EngineErrorKind::UnknownTemplate
            }
            Self::CyclicTemplate { .. } => EngineErrorKind::CyclicTemplate,
            Self::NestingDepthExceeded { .. } => EngineErrorKind::NestingDepthExceeded,
            Self::UnknownBuffer { .. } => EngineErrorKind::UnknownBuffer,
            Self::GoldenMismatch { .. } => EngineErrorKind::GoldenMismatch,
            Self::Core(_) | Self::Io(_) => EngineErrorKind::Other,
        }
    }
}

/// Errors collected while rendering several outputs
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Errors by output name (IndexMap preserves insertion order)
    pub errors_by_output: IndexMap<String, EngineError>,

    /// Outputs rendered without error
    pub successful_outputs: Vec<String>,
}

impl RenderReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, output: String, error: EngineError) {
        self.errors_by_output.insert(output, error);
    }

    pub fn add_success(&mut self, output: String) {
        self.successful_outputs.push(output);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors_by_output.is_empty()
    }

    /// Generate summary message: "2 errors in 5 outputs"
    pub fn summary(&self) -> String {
        let errors = self.errors_by_output.len();
        let total = errors + self.successful_outputs.len();
        let error_word = if errors == 1 { "error" } else { "errors" };
        let output_word = if total == 1 { "output" } else { "outputs" };
        format!("{} {} in {} {}", errors, error_word, total, output_word)
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
