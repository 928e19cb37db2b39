//! Quill Core - Core types for the code generation template engine
//!
//! This crate provides the foundational types used throughout Quill:
//! - `Template`: literal segments interleaved with placeholder values
//! - `PlaceholderValue`: the closed set of values a placeholder can hold
//! - `RenderConfig`: rendering options threaded into the engine
//! - `TemplateRegistry`: named template constructors over a model type
//! - `TemplateDocument`: pre-parsed templates serialized as YAML or JSON
//! - `DatabaseSchema`: a sample read-only model (tables and columns)

pub mod config;
pub mod document;
pub mod error;
pub mod registry;
pub mod schema;
pub mod template;
pub mod value;

pub use config::RenderConfig;
pub use document::TemplateDocument;
pub use error::{CoreError, Result};
pub use registry::{TemplateRegistry, TemplateSource};
pub use schema::{Column, DatabaseSchema, Table};
pub use template::{Template, TemplateBuilder};
pub use value::{PlaceholderValue, ValueKind};
