//! Template lookup
//!
//! Two kinds of lookup feed the renderer:
//! - `TemplateSource` resolves `PlaceholderValue::Include` names to shared
//!   template instances at render time.
//! - `TemplateRegistry<M>` maps names to template functions over a model
//!   type, replacing load-by-type with explicit registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{CoreError, Result};
use crate::template::Template;

/// Resolves include names to templates
///
/// An implementation may hand out a shared instance or a fresh copy per
/// lookup. The renderer recognizes a cycle either way, by instance identity
/// or by include name.
pub trait TemplateSource: Send + Sync {
    fn template(&self, name: &str) -> Option<Arc<Template>>;
}

impl TemplateSource for HashMap<String, Arc<Template>> {
    fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.get(name).cloned()
    }
}

impl TemplateSource for IndexMap<String, Arc<Template>> {
    fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.get(name).cloned()
    }
}

type TemplateFn<M> = Arc<dyn Fn(&M) -> Template + Send + Sync>;

/// Named template functions over a model type `M`
///
/// ```
/// use quill_core::{Table, Template, TemplateRegistry};
///
/// let mut registry = TemplateRegistry::<Table>::new();
/// registry.register("poco", |table: &Table| {
///     Template::builder().text("public class ").value(&table.table_name).build()
/// });
///
/// let table = Table::new("Users");
/// let template = registry.build("poco", &table).unwrap();
/// assert_eq!(template.name(), Some("poco"));
/// ```
pub struct TemplateRegistry<M> {
    templates: IndexMap<String, TemplateFn<M>>,
}

impl<M> Default for TemplateRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for TemplateRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<M> TemplateRegistry<M> {
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Register a template function, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, template: F) -> &mut Self
    where
        F: Fn(&M) -> Template + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Arc::new(template));
        self
    }

    /// Builder-style registration
    pub fn with<F>(mut self, name: impl Into<String>, template: F) -> Self
    where
        F: Fn(&M) -> Template + Send + Sync + 'static,
    {
        self.register(name, template);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Produce the template for `model`
    ///
    /// Templates without a name of their own are named after the registry key.
    pub fn build(&self, name: &str, model: &M) -> Result<Template> {
        let template_fn = self
            .templates
            .get(name)
            .ok_or_else(|| CoreError::UnknownTemplate {
                name: name.to_string(),
            })?;

        let template = template_fn(model);
        if template.name().is_some() {
            Ok(template)
        } else {
            Ok(template.named(name))
        }
    }
}
