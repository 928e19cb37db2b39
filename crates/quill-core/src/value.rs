//! Placeholder values
//!
//! The set of shapes a placeholder can hold is closed: the renderer matches on
//! `PlaceholderValue` exhaustively. Application code builds values through the
//! `From` conversions below, so `table.columns.iter().map(render_column)` can
//! be collected straight into a `Sequence`.

use std::fmt;
use std::sync::Arc;

use crate::template::Template;

/// The payload substituted at one interpolation point
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlaceholderValue {
    /// Plain text, re-indented when it spans several lines
    Scalar(String),

    /// A full template rendered recursively and spliced in place
    Nested(Arc<Template>),

    /// Items joined with a newline, empty items skipped
    Sequence(Vec<PlaceholderValue>),

    /// A template looked up by name at render time
    Include(String),

    /// Contributes nothing, not even a line break
    #[default]
    Empty,
}

/// Tag of a `PlaceholderValue`, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Nested,
    Sequence,
    Include,
    Empty,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Nested => "template",
            Self::Sequence => "sequence",
            Self::Include => "include",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PlaceholderValue {
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    /// A scalar from anything printable (numbers, identifiers, ...)
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Scalar(value.to_string())
    }

    pub fn include(name: impl Into<String>) -> Self {
        Self::Include(name.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Nested(_) => ValueKind::Nested,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Include(_) => ValueKind::Include,
            Self::Empty => ValueKind::Empty,
        }
    }

    /// Names of every template this value includes, recursively
    ///
    /// Walks nested templates and sequences but does not follow includes.
    pub fn includes(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_includes(&mut names);
        names
    }

    fn collect_includes<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Include(name) => names.push(name),
            Self::Nested(template) => {
                for value in template.values() {
                    value.collect_includes(names);
                }
            }
            Self::Sequence(items) => {
                for item in items {
                    item.collect_includes(names);
                }
            }
            Self::Scalar(_) | Self::Empty => {}
        }
    }
}

impl From<&str> for PlaceholderValue {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_string())
    }
}

impl From<String> for PlaceholderValue {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<&String> for PlaceholderValue {
    fn from(text: &String) -> Self {
        Self::Scalar(text.clone())
    }
}

impl From<Template> for PlaceholderValue {
    fn from(template: Template) -> Self {
        Self::Nested(Arc::new(template))
    }
}

impl From<Arc<Template>> for PlaceholderValue {
    fn from(template: Arc<Template>) -> Self {
        Self::Nested(template)
    }
}

impl<T: Into<PlaceholderValue>> From<Vec<T>> for PlaceholderValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PlaceholderValue>> From<Option<T>> for PlaceholderValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

impl<T: Into<PlaceholderValue>> FromIterator<T> for PlaceholderValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(PlaceholderValue::from("a"), PlaceholderValue::scalar("a"));
        assert_eq!(
            PlaceholderValue::from(String::from("b")),
            PlaceholderValue::Scalar("b".into())
        );
        assert_eq!(PlaceholderValue::from(None::<&str>), PlaceholderValue::Empty);
        assert_eq!(PlaceholderValue::display(42), PlaceholderValue::scalar("42"));

        let seq: PlaceholderValue = vec!["a", "b"].into();
        assert_eq!(seq.kind(), ValueKind::Sequence);
    }

    #[test]
    fn test_collect_into_sequence() {
        let names = ["Id", "Name"];
        let value: PlaceholderValue = names.iter().map(|n| format!("int {n};")).collect();

        match value {
            PlaceholderValue::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1], PlaceholderValue::scalar("int Name;"));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PlaceholderValue::Empty.kind().to_string(), "empty");
        assert_eq!(PlaceholderValue::include("x").kind().as_str(), "include");
        assert_eq!(
            PlaceholderValue::from(Template::literal("t")).kind(),
            ValueKind::Nested
        );
    }

    #[test]
    fn test_includes_walks_nested_values() {
        let inner = Template::builder()
            .value(PlaceholderValue::include("column"))
            .build();
        let value = PlaceholderValue::Sequence(vec![
            PlaceholderValue::include("header"),
            inner.into(),
            PlaceholderValue::scalar("x"),
        ]);

        assert_eq!(value.includes(), vec!["header", "column"]);
    }
}
