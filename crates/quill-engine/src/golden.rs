//! Golden text comparison
//!
//! Rendered output is compared against expected text after normalization:
//! - `\r\n` line endings become `\n`
//! - lines holding only whitespace become empty
//! - trailing line breaks are ignored
//!
//! A mismatch carries a line diff computed with `similar`.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Normalize text for golden comparison
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let lines: Vec<&str> = unified
        .split('\n')
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect();

    lines.join("\n").trim_end_matches('\n').to_string()
}

/// True if both texts are equal after normalization
pub fn matches(actual: &str, expected: &str) -> bool {
    normalize(actual) == normalize(expected)
}

/// Line-level diff between expected and actual text
#[derive(Debug, Clone, PartialEq)]
pub struct GoldenDiff {
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffLine {
    pub line_type: LineType,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Present in the expected text only
    Removed,
    /// Present in the rendered text only
    Added,
    Context,
}

impl GoldenDiff {
    /// Diff the normalized forms of `expected` and `actual`
    pub fn compute(expected: &str, actual: &str) -> Self {
        let expected = normalize(expected);
        let actual = normalize(actual);
        let diff = TextDiff::from_lines(&expected, &actual);

        let lines = diff
            .iter_all_changes()
            .map(|change| DiffLine {
                line_type: match change.tag() {
                    ChangeTag::Delete => LineType::Removed,
                    ChangeTag::Insert => LineType::Added,
                    ChangeTag::Equal => LineType::Context,
                },
                content: change.value().trim_end_matches('\n').to_string(),
            })
            .collect();

        Self { lines }
    }

    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|l| l.line_type != LineType::Context)
    }

    /// Changed lines only
    pub fn changes(&self) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(|l| l.line_type != LineType::Context)
    }
}

impl fmt::Display for GoldenDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let sign = match line.line_type {
                LineType::Removed => '-',
                LineType::Added => '+',
                LineType::Context => ' ',
            };
            writeln!(f, "{}{}", sign, line.content)?;
        }
        Ok(())
    }
}
