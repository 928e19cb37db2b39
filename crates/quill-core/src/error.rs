//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unsupported placeholder value kind `{kind}` at {location}")]
    UnsupportedValueKind { kind: String, location: String },

    #[error("Template has {segments} literal segments for {values} placeholders (expected {expected})")]
    SegmentCountMismatch {
        segments: usize,
        values: usize,
        expected: usize,
    },

    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    #[error("Invalid template document: {message}")]
    InvalidDocument { message: String },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
