//! Templates: literal text interleaved with placeholder values
//!
//! A `Template` is inert data. It is produced eagerly (by a template function,
//! a `TemplateBuilder`, or a template document) and only walked when it is
//! handed to the renderer.
//!
//! # Example
//!
//! ```
//! use quill_core::Template;
//!
//! let column = Template::builder()
//!     .text("public int ")
//!     .value("Id")
//!     .text(" { get; set; }")
//!     .build();
//!
//! assert_eq!(column.segments(), ["public int ", " { get; set; }"]);
//! assert_eq!(column.placeholder_count(), 1);
//! ```

use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::value::PlaceholderValue;

/// An ordered sequence of literal segments and placeholder values
///
/// Always holds exactly one more segment than values: the template starts and
/// ends with a (possibly empty) literal segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: Option<String>,
    segments: Vec<String>,
    values: Vec<PlaceholderValue>,
}

impl Template {
    /// Create a template from raw parts, validating the segment count
    pub fn new(segments: Vec<String>, values: Vec<PlaceholderValue>) -> Result<Self> {
        let expected = values.len() + 1;
        if segments.len() != expected {
            return Err(CoreError::SegmentCountMismatch {
                segments: segments.len(),
                values: values.len(),
                expected,
            });
        }

        Ok(Self {
            name: None,
            segments,
            values,
        })
    }

    /// A template with no placeholders
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            name: None,
            segments: vec![text.into()],
            values: Vec::new(),
        }
    }

    /// Create a builder
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// Attach a diagnostic name (shown in cycle errors and logs)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for diagnostics, `<anonymous>` when unnamed
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn values(&self) -> &[PlaceholderValue] {
        &self.values
    }

    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// True if the template has no placeholders
    pub fn is_literal(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (segment, following placeholder) pairs
    ///
    /// The last segment is paired with `None`.
    pub fn parts(&self) -> impl Iterator<Item = (&str, Option<&PlaceholderValue>)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, segment)| (segment.as_str(), self.values.get(i)))
    }

    /// Wrap in an `Arc` so it can be shared between placeholders and threads
    pub fn into_shared(self) -> Arc<Template> {
        Arc::new(self)
    }
}

/// Incremental template construction
///
/// Adjacent text is merged into one segment and adjacent values get an empty
/// segment between them, so the segment invariant always holds.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    name: Option<String>,
    segments: Vec<String>,
    values: Vec<PlaceholderValue>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            segments: vec![String::new()],
            values: Vec::new(),
        }
    }

    /// Set the template name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append literal text
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a placeholder value
    pub fn value(mut self, value: impl Into<PlaceholderValue>) -> Self {
        self.push_value(value);
        self
    }

    pub fn push_text(&mut self, text: impl AsRef<str>) {
        // segments is never empty: new() seeds it and push_value appends
        if let Some(last) = self.segments.last_mut() {
            last.push_str(text.as_ref());
        }
    }

    pub fn push_value(&mut self, value: impl Into<PlaceholderValue>) {
        self.values.push(value.into());
        self.segments.push(String::new());
    }

    pub fn build(self) -> Template {
        Template {
            name: self.name,
            segments: self.segments,
            values: self.values,
        }
    }
}
