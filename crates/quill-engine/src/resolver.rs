//! Placeholder value resolution
//!
//! Turns a `PlaceholderValue` into the lines it contributes. The first line
//! continues the placeholder's line; every later line is already prefixed
//! with the placeholder's indent. An empty vector is the empty result.

use quill_core::PlaceholderValue;
use tracing::trace;

use crate::error::Result;
use crate::renderer::Renderer;

/// Expands placeholder values, re-entering the renderer for templates
pub struct ValueResolver<'r, 'a> {
    renderer: &'r mut Renderer<'a>,
}

impl<'r, 'a> ValueResolver<'r, 'a> {
    pub fn new(renderer: &'r mut Renderer<'a>) -> Self {
        Self { renderer }
    }

    /// Resolve `value` for a placeholder whose line is indented by `indent`
    pub fn resolve(&mut self, value: &PlaceholderValue, indent: &str) -> Result<Vec<String>> {
        match value {
            PlaceholderValue::Scalar(text) => Ok(indent_lines(text, indent)),
            PlaceholderValue::Nested(template) => {
                let text = self.renderer.render_nested(template, None)?;
                Ok(indent_lines(&text, indent))
            }
            PlaceholderValue::Include(name) => {
                let template = self.renderer.lookup(name)?;
                trace!(include = name.as_str(), "resolving include");
                let text = self.renderer.render_nested(&template, Some(name))?;
                Ok(indent_lines(&text, indent))
            }
            PlaceholderValue::Sequence(items) => self.join_items(items, indent),
            PlaceholderValue::Empty => Ok(Vec::new()),
        }
    }

    /// Join item blocks with one line break each, skipping empty items
    fn join_items(&mut self, items: &[PlaceholderValue], indent: &str) -> Result<Vec<String>> {
        let mut lines: Vec<String> = Vec::new();

        for item in items {
            let mut block = self.resolve(item, indent)?.into_iter();
            let Some(first) = block.next() else {
                continue;
            };

            if lines.is_empty() {
                lines.push(first);
            } else {
                // starts a new line, so it takes the indent too
                lines.push(format!("{}{}", indent, first));
            }
            lines.extend(block);
        }

        Ok(lines)
    }
}

/// Split text into lines, prefixing all but the first with `indent`
///
/// `\r\n` counts as a line break. Empty text yields no lines.
fn indent_lines(text: &str, indent: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect()
}
