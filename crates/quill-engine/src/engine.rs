//! Rendering entry points

use std::sync::Arc;

use quill_core::{RenderConfig, Template, TemplateDocument, TemplateRegistry, TemplateSource};
use tracing::debug;

use crate::buffer::OutputContext;
use crate::error::{EngineError, RenderReport, Result};
use crate::indent::IndentTracker;
use crate::renderer::Renderer;

/// Engine builder
#[derive(Default)]
pub struct EngineBuilder {
    config: RenderConfig,
    source: Option<Arc<dyn TemplateSource>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Reduce whitespace-only lines to empty lines (default: on)
    pub fn strip_whitespace_on_empty_lines(mut self, strip: bool) -> Self {
        self.config.strip_whitespace_on_empty_lines = strip;
        self
    }

    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.config.indent_unit = unit.into();
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Source used to resolve `Include` values
    pub fn source(mut self, source: Arc<dyn TemplateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the engine
    pub fn build(self) -> Engine {
        Engine {
            config: self.config,
            source: self.source,
        }
    }
}

/// Result of rendering every output of a document, collecting errors
#[derive(Debug)]
pub struct DocumentRender {
    /// Buffers of the outputs that rendered successfully
    pub output: OutputContext,

    /// Errors by output (empty if everything rendered)
    pub report: RenderReport,
}

impl DocumentRender {
    pub fn is_success(&self) -> bool {
        !self.report.has_errors()
    }
}

/// The template engine
///
/// Holds configuration only; every render builds its own `Renderer`, so one
/// engine can serve several threads at once.
#[derive(Clone, Default)]
pub struct Engine {
    config: RenderConfig,
    source: Option<Arc<dyn TemplateSource>>,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Create a builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// An empty output context using this engine's indent unit
    pub fn output_context(&self) -> OutputContext {
        OutputContext::with_config(&self.config)
    }

    /// Render a top-level template to text
    pub fn render_to_string(&self, template: &Template) -> Result<String> {
        self.render_with_source(template, self.source.as_deref(), IndentTracker::new())
    }

    /// Render a template and append it to the named buffer
    ///
    /// The render continues the buffer's last line: a placeholder on the
    /// first line takes its indent from what is already written there. The
    /// template is rendered completely before anything is written, so a
    /// failed render leaves the buffer untouched.
    pub fn render(&self, output: &mut OutputContext, buffer: &str, template: &Template) -> Result<()> {
        let line = output.line_state(buffer);
        let text = self.render_with_source(template, self.source.as_deref(), line)?;
        output.write(buffer, &text);
        Ok(())
    }

    /// Build a registered template for `model` and render it into the named buffer
    pub fn render_model<M>(
        &self,
        output: &mut OutputContext,
        buffer: &str,
        registry: &TemplateRegistry<M>,
        name: &str,
        model: &M,
    ) -> Result<()> {
        let template = registry.build(name, model)?;
        self.render(output, buffer, &template)
    }

    /// Render every output of a document, stopping at the first error
    ///
    /// Includes resolve against the document itself.
    pub fn render_document(&self, document: &TemplateDocument) -> Result<OutputContext> {
        let mut output = self.output_context();

        for (name, _) in document.outputs() {
            let template = document.output_template(name)?;
            let text = self.render_with_source(template, Some(document), IndentTracker::new())?;
            output.write(name, &text);
        }

        Ok(output)
    }

    /// Render every output of a document, collecting errors instead of
    /// stopping at the first
    pub fn render_document_collect_errors(&self, document: &TemplateDocument) -> DocumentRender {
        let mut output = self.output_context();
        let mut report = RenderReport::new();

        for (name, _) in document.outputs() {
            let rendered = document
                .output_template(name)
                .map_err(EngineError::from)
                .and_then(|template| {
                    self.render_with_source(template, Some(document), IndentTracker::new())
                });

            match rendered {
                Ok(text) => {
                    output.write(name, &text);
                    report.add_success(name.to_string());
                }
                Err(e) => {
                    debug!(output = name, error = %e, "output failed to render");
                    report.add_error(name.to_string(), e);
                }
            }
        }

        DocumentRender { output, report }
    }

    fn render_with_source(
        &self,
        template: &Template,
        source: Option<&dyn TemplateSource>,
        line: IndentTracker,
    ) -> Result<String> {
        let mut renderer = Renderer::new(&self.config);
        if let Some(source) = source {
            renderer = renderer.with_source(source);
        }
        renderer.render_from(template, line)
    }
}
