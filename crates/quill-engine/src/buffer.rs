//! Named output buffers
//!
//! An `OutputContext` owns one `OutputBuffer` per generated file. Buffers are
//! created on first write and live as long as the context. Which buffer a
//! render targets is always the caller's choice.
//!
//! Buffers are single-writer: mutation goes through `&mut`, there is no
//! internal locking.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use quill_core::RenderConfig;
use quill_core::config::DEFAULT_INDENT_UNIT;

use crate::error::{EngineError, Result};
use crate::golden::{self, GoldenDiff};
use crate::indent::IndentTracker;

/// Append-only text accumulator for one output
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    name: String,
    text: String,
    indent_unit: String,
    indent_level: usize,
    at_line_start: bool,
    line: IndentTracker,
}

impl OutputBuffer {
    pub fn new(name: impl Into<String>, indent_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            indent_unit: indent_unit.into(),
            indent_level: 0,
            at_line_start: true,
            line: IndentTracker::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// State of the last line, as written by callers
    ///
    /// The buffer indent is not part of it: it is added again to every line
    /// a continuing render starts.
    pub fn line(&self) -> &IndentTracker {
        &self.line
    }

    /// Indent text written from the next line start by one more unit
    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Append text
    ///
    /// Every non-empty line that starts in this write is prefixed with the
    /// current buffer indent.
    pub fn write(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.text.push('\n');
                self.at_line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent_level {
                    self.text.push_str(&self.indent_unit);
                }
                self.at_line_start = false;
            }
            self.text.push_str(line);
        }
        self.line.advance(text);
    }

    /// Append text followed by a line break
    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Clear the text and indentation
    pub fn reset(&mut self) {
        self.text.clear();
        self.indent_level = 0;
        self.at_line_start = true;
        self.line = IndentTracker::new();
    }
}

/// The set of named buffers of one generation session
#[derive(Debug, Clone)]
pub struct OutputContext {
    buffers: IndexMap<String, OutputBuffer>,
    indent_unit: String,
}

impl Default for OutputContext {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputContext {
    pub fn new() -> Self {
        Self {
            buffers: IndexMap::new(),
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
        }
    }

    /// Buffers created by this context use the configured indent unit
    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            buffers: IndexMap::new(),
            indent_unit: config.indent_unit.clone(),
        }
    }

    /// Get a buffer for writing, creating it on first reference
    pub fn buffer_mut(&mut self, name: &str) -> &mut OutputBuffer {
        let indent_unit = &self.indent_unit;
        self.buffers
            .entry(name.to_string())
            .or_insert_with(|| OutputBuffer::new(name, indent_unit.clone()))
    }

    pub fn buffer(&self, name: &str) -> Result<&OutputBuffer> {
        self.buffers.get(name).ok_or_else(|| EngineError::UnknownBuffer {
            name: name.to_string(),
        })
    }

    /// Line state at the end of a buffer, fresh for a buffer not yet created
    pub fn line_state(&self, name: &str) -> IndentTracker {
        self.buffers
            .get(name)
            .map(|buffer| buffer.line().clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buffers.contains_key(name)
    }

    /// Append text to a buffer, creating it on first reference
    pub fn write(&mut self, name: &str, text: &str) {
        self.buffer_mut(name).write(text);
    }

    /// Current text of a buffer
    pub fn contents(&self, name: &str) -> Result<&str> {
        self.buffer(name).map(OutputBuffer::contents)
    }

    /// Clear a buffer
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownBuffer {
                name: name.to_string(),
            })?;
        buffer.reset();
        Ok(())
    }

    /// Buffers in creation order
    pub fn buffers(&self) -> impl Iterator<Item = &OutputBuffer> {
        self.buffers.values()
    }

    /// Drop every buffer whose name does not satisfy `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.buffers.retain(|name, _| keep(name));
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// True if the buffer equals `expected` after normalization
    pub fn matches(&self, name: &str, expected: &str) -> Result<bool> {
        Ok(golden::matches(self.contents(name)?, expected))
    }

    /// Compare a buffer against expected text, failing with a diff on mismatch
    pub fn compare(&self, name: &str, expected: &str) -> Result<()> {
        let actual = self.contents(name)?;
        if golden::matches(actual, expected) {
            return Ok(());
        }

        Err(EngineError::GoldenMismatch {
            buffer: name.to_string(),
            diff: GoldenDiff::compute(expected, actual),
        })
    }

    /// Compare a buffer against the file `<dir>/<buffer name>`
    pub fn compare_with_file(&self, name: &str, dir: impl AsRef<Path>) -> Result<()> {
        let expected = std::fs::read_to_string(dir.as_ref().join(name))?;
        self.compare(name, &expected)
    }

    /// Write every buffer to `<dir>/<buffer name>`, creating directories as needed
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.buffers.len());

        for buffer in self.buffers.values() {
            let path = dir.join(buffer.name());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, buffer.contents())?;
            written.push(path);
        }

        Ok(written)
    }
}
