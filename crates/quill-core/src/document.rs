//! Template documents
//!
//! A template document stores already-parsed templates as YAML or JSON, plus
//! the routing of templates to output files. It is a serialization of the
//! template tree, not a template language: text is never scanned for
//! placeholders.
//!
//! ```yaml
//! templates:
//!   column:
//!     - "public int Id { get; set; }"
//!   table:
//!     - "public class Users\n{\n    "
//!     - sequence:
//!         - include: column
//!         - scalar: "public string Name { get; set; }"
//!     - "\n}"
//! outputs:
//!   Users.cs: table
//! ```
//!
//! A template is a list of parts. Strings are literal text; anything else is a
//! placeholder value:
//!
//! | form                | value                        |
//! |---------------------|------------------------------|
//! | `~` / `null`        | `Empty`                      |
//! | `empty: ~`          | `Empty`                      |
//! | `scalar: text`      | `Scalar` (numbers and booleans are printed) |
//! | `template: [parts]` | `Nested`                     |
//! | `sequence: [items]` | `Sequence` (bare strings are scalars) |
//! | `include: name`     | `Include`                    |
//!
//! Any other shape is rejected with `CoreError::UnsupportedValueKind`.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::{CoreError, Result};
use crate::registry::TemplateSource;
use crate::template::{Template, TemplateBuilder};
use crate::value::PlaceholderValue;

/// Named templates and the outputs they render to
#[derive(Debug, Clone, Default)]
pub struct TemplateDocument {
    templates: IndexMap<String, Arc<Template>>,
    outputs: IndexMap<String, String>,
}

impl TemplateDocument {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: JsonValue = serde_yaml::from_str(yaml)?;
        Self::from_value(&raw)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: JsonValue = serde_json::from_str(json)?;
        Self::from_value(&raw)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Build from an already-deserialized document
    pub fn from_value(raw: &JsonValue) -> Result<Self> {
        let root = raw.as_object().ok_or_else(|| CoreError::InvalidDocument {
            message: format!("expected a map at the top level, found {}", json_kind(raw)),
        })?;

        if let Some(key) = root
            .keys()
            .find(|k| k.as_str() != "templates" && k.as_str() != "outputs")
        {
            return Err(CoreError::InvalidDocument {
                message: format!("unknown top-level key `{}`", key),
            });
        }

        let raw_templates = match root.get("templates") {
            Some(JsonValue::Object(map)) => map,
            Some(other) => {
                return Err(CoreError::InvalidDocument {
                    message: format!("`templates` must be a map, found {}", json_kind(other)),
                });
            }
            None => {
                return Err(CoreError::InvalidDocument {
                    message: "missing `templates`".to_string(),
                });
            }
        };

        let mut templates = IndexMap::new();
        for (name, parts) in raw_templates {
            let location = format!("templates.{}", name);
            let template = parse_template(parts, &location)?.named(name.clone());
            templates.insert(name.clone(), Arc::new(template));
        }

        let outputs = match root.get("outputs") {
            Some(JsonValue::Object(map)) => parse_outputs(map)?,
            Some(JsonValue::Null) | None => templates
                .keys()
                .map(|name| (name.clone(), name.clone()))
                .collect(),
            Some(other) => {
                return Err(CoreError::InvalidDocument {
                    message: format!("`outputs` must be a map, found {}", json_kind(other)),
                });
            }
        };

        let document = Self { templates, outputs };
        document.check_references()?;
        Ok(document)
    }

    pub fn template(&self, name: &str) -> Option<&Arc<Template>> {
        self.templates.get(name)
    }

    /// Templates in document order
    pub fn templates(&self) -> impl Iterator<Item = (&str, &Arc<Template>)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// (output name, template name) pairs in document order
    ///
    /// When the document has no `outputs` section every template renders to
    /// an output of the same name.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Template routed to the given output
    pub fn output_template(&self, output: &str) -> Result<&Arc<Template>> {
        let name = self
            .outputs
            .get(output)
            .ok_or_else(|| CoreError::UnknownTemplate {
                name: output.to_string(),
            })?;

        self.templates
            .get(name)
            .ok_or_else(|| CoreError::UnknownTemplate { name: name.clone() })
    }

    fn check_references(&self) -> Result<()> {
        for template_name in self.outputs.values() {
            if !self.templates.contains_key(template_name) {
                return Err(CoreError::UnknownTemplate {
                    name: template_name.clone(),
                });
            }
        }

        for template in self.templates.values() {
            for value in template.values() {
                if let Some(missing) = value
                    .includes()
                    .into_iter()
                    .find(|name| !self.templates.contains_key(*name))
                {
                    return Err(CoreError::UnknownTemplate {
                        name: missing.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl TemplateSource for TemplateDocument {
    fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.get(name).cloned()
    }
}

fn parse_outputs(map: &Map<String, JsonValue>) -> Result<IndexMap<String, String>> {
    map.iter()
        .map(|(output, template)| match template {
            JsonValue::String(name) => Ok((output.clone(), name.clone())),
            other => Err(CoreError::InvalidDocument {
                message: format!(
                    "output `{}` must name a template, found {}",
                    output,
                    json_kind(other)
                ),
            }),
        })
        .collect()
}

/// Parse a list of parts into a template
fn parse_template(raw: &JsonValue, location: &str) -> Result<Template> {
    let parts = match raw {
        JsonValue::Array(parts) => parts,
        // A lone string is shorthand for a literal-only template
        JsonValue::String(text) => return Ok(Template::literal(text.clone())),
        other => {
            return Err(CoreError::InvalidDocument {
                message: format!(
                    "{} must be a list of parts, found {}",
                    location,
                    json_kind(other)
                ),
            });
        }
    };

    let mut builder = TemplateBuilder::new();
    for (i, part) in parts.iter().enumerate() {
        match part {
            JsonValue::String(text) => builder.push_text(text),
            other => builder.push_value(parse_value(other, &format!("{}[{}]", location, i))?),
        }
    }

    Ok(builder.build())
}

/// Parse one placeholder value
fn parse_value(raw: &JsonValue, location: &str) -> Result<PlaceholderValue> {
    match raw {
        JsonValue::Null => Ok(PlaceholderValue::Empty),
        JsonValue::String(text) => Ok(PlaceholderValue::Scalar(text.clone())),
        JsonValue::Number(n) => Ok(PlaceholderValue::Scalar(n.to_string())),
        JsonValue::Bool(b) => Ok(PlaceholderValue::Scalar(b.to_string())),
        JsonValue::Array(items) => parse_sequence(items, location),
        JsonValue::Object(map) => parse_tagged(map, location),
    }
}

fn parse_sequence(items: &[JsonValue], location: &str) -> Result<PlaceholderValue> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_value(item, &format!("{}[{}]", location, i)))
        .collect::<Result<Vec<_>>>()
        .map(PlaceholderValue::Sequence)
}

fn parse_tagged(map: &Map<String, JsonValue>, location: &str) -> Result<PlaceholderValue> {
    let mut entries = map.iter();
    let (tag, payload) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(unsupported(
                format!("map with keys [{}]", map.keys().cloned().collect::<Vec<_>>().join(", ")),
                location,
            ));
        }
    };

    let location = format!("{}.{}", location, tag);
    match tag.as_str() {
        "empty" => Ok(PlaceholderValue::Empty),
        "scalar" => match payload {
            JsonValue::String(text) => Ok(PlaceholderValue::Scalar(text.clone())),
            JsonValue::Number(n) => Ok(PlaceholderValue::Scalar(n.to_string())),
            JsonValue::Bool(b) => Ok(PlaceholderValue::Scalar(b.to_string())),
            other => Err(unsupported(format!("scalar {}", json_kind(other)), &location)),
        },
        "template" => Ok(PlaceholderValue::Nested(Arc::new(parse_template(
            payload, &location,
        )?))),
        "sequence" => match payload {
            JsonValue::Array(items) => parse_sequence(items, &location),
            JsonValue::Null => Ok(PlaceholderValue::Sequence(Vec::new())),
            other => Err(unsupported(format!("sequence {}", json_kind(other)), &location)),
        },
        "include" => match payload {
            JsonValue::String(name) => Ok(PlaceholderValue::Include(name.clone())),
            other => Err(unsupported(format!("include {}", json_kind(other)), &location)),
        },
        other => Err(unsupported(other.to_string(), &location)),
    }
}

fn unsupported(kind: String, location: &str) -> CoreError {
    CoreError::UnsupportedValueKind {
        kind,
        location: location.to_string(),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "map",
    }
}
