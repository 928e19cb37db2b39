//! Column and indent tracking
//!
//! The tracker follows the text emitted by one render pass. The indent of a
//! placeholder is the whitespace prefix of the line it sits on, taken from the
//! emitted text itself, so indent added by earlier expansions on the same line
//! is included. Tabs and spaces are captured verbatim and never converted.

/// Tracks the current column and line indent of emitted text
#[derive(Debug, Clone)]
pub struct IndentTracker {
    column: usize,
    line_indent: String,
    in_leading_whitespace: bool,
}

impl Default for IndentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentTracker {
    pub fn new() -> Self {
        Self {
            column: 0,
            line_indent: String::new(),
            in_leading_whitespace: true,
        }
    }

    /// Characters emitted since the last line break
    pub fn column(&self) -> usize {
        self.column
    }

    /// Whitespace prefix of the current line
    pub fn indent(&self) -> &str {
        &self.line_indent
    }

    /// True once the current line holds something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.in_leading_whitespace
    }

    /// Record emitted text
    pub fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.column = 0;
                self.line_indent.clear();
                self.in_leading_whitespace = true;
                continue;
            }

            self.column += 1;
            if self.in_leading_whitespace {
                if is_indent_char(ch) {
                    self.line_indent.push(ch);
                } else {
                    self.in_leading_whitespace = false;
                }
            }
        }
    }

    /// Record the literal segment just emitted and return the indent for the
    /// placeholder that follows it
    ///
    /// Without a line break in the segment, the indent continues from the line
    /// already in progress (or from the start of the text).
    pub fn indent_for(&mut self, preceding_segment: &str) -> String {
        self.advance(preceding_segment);
        self.line_indent.clone()
    }
}

fn is_indent_char(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n' && ch != '\r'
}
