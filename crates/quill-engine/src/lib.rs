//! Quill Engine - rendering of code generation templates
//!
//! This crate turns `quill_core::Template` trees into text:
//! - Indentation tracking: placeholders inherit the indent of their line
//! - Value resolution: scalars, nested templates, sequences and includes
//! - Recursive rendering with cycle and nesting-depth protection
//! - Named output buffers with golden-text comparison

pub mod buffer;
pub mod engine;
pub mod error;
pub mod golden;
pub mod indent;
pub mod renderer;
pub mod resolver;

pub use buffer::{OutputBuffer, OutputContext};
pub use engine::{DocumentRender, Engine, EngineBuilder};
pub use error::{EngineError, EngineErrorKind, RenderReport, Result};
pub use golden::{DiffLine, GoldenDiff, LineType};
pub use indent::IndentTracker;
pub use renderer::{RenderContext, Renderer};
pub use resolver::ValueResolver;
