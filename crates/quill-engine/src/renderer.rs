//! Template rendering
//!
//! The renderer walks a template's (literal, placeholder) pairs depth-first.
//! Literal segments are emitted verbatim; each placeholder is expanded by the
//! `ValueResolver` and spliced in at the indent of the line it sits on.
//!
//! Nested templates are rendered with a fresh `RenderContext` (indent
//! baseline of zero) and re-indented by the caller, so factoring a block out
//! into a sub-template never changes the output.
//!
//! Two normalization steps apply to the top-level template only:
//! 1. Layout trimming, so templates can be laid out like a heredoc: a blank
//!    first line of the first literal segment and the final line break of the
//!    last literal segment are dropped, then the left margin shared by every
//!    non-blank line of the literal text is removed. Substituted content is
//!    never trimmed.
//! 2. Lines made only of whitespace are emptied when
//!    `strip_whitespace_on_empty_lines` is set.
//!
//! A top-level render may continue a line already started in its target
//! buffer: the buffer's line state seeds the first line's indent.

use std::sync::Arc;

use quill_core::{RenderConfig, Template, TemplateSource};
use tracing::{debug, trace};

use crate::error::{EngineError, Result};
use crate::indent::IndentTracker;
use crate::resolver::ValueResolver;

/// Mutable state of one render pass
#[derive(Debug)]
pub struct RenderContext {
    output: String,
    tracker: IndentTracker,
    strip_whitespace_on_empty_lines: bool,
    continues_content: bool,
}

impl RenderContext {
    pub fn new(strip_whitespace_on_empty_lines: bool) -> Self {
        Self::continuing(strip_whitespace_on_empty_lines, IndentTracker::new())
    }

    /// Start from the state of a line that is already partly written
    pub fn continuing(strip_whitespace_on_empty_lines: bool, line: IndentTracker) -> Self {
        Self {
            output: String::new(),
            continues_content: line.has_content(),
            tracker: line,
            strip_whitespace_on_empty_lines,
        }
    }

    pub fn column(&self) -> usize {
        self.tracker.column()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Emit a literal segment and return the indent for the placeholder after it
    pub fn push_literal(&mut self, segment: &str) -> String {
        self.output.push_str(segment);
        self.tracker.indent_for(segment)
    }

    /// Emit resolved lines: the first continues the current line, the rest
    /// (already indented) each start a new line
    pub fn push_lines(&mut self, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
                self.tracker.advance("\n");
            }
            self.output.push_str(line);
            self.tracker.advance(line);
        }
    }

    /// Finish the pass
    ///
    /// A first line that continues written content is never stripped.
    pub fn finish(self) -> String {
        if !self.strip_whitespace_on_empty_lines {
            return self.output;
        }

        if !self.continues_content {
            return strip_whitespace_lines(&self.output);
        }

        match self.output.split_once('\n') {
            Some((first, rest)) => format!("{}\n{}", first, strip_whitespace_lines(rest)),
            None => self.output.clone(),
        }
    }
}

struct Frame {
    id: usize,
    name: String,
    include: Option<String>,
}

/// Recursive template renderer
///
/// Borrowed for the duration of one top-level render. Holds the stack of
/// templates being expanded (for cycle detection) and the nesting depth.
pub struct Renderer<'a> {
    config: &'a RenderConfig,
    source: Option<&'a dyn TemplateSource>,
    stack: Vec<Frame>,
    depth: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            source: None,
            stack: Vec::new(),
            depth: 0,
        }
    }

    /// Resolve `Include` values through `source`
    pub fn with_source(mut self, source: &'a dyn TemplateSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Current nesting depth (0 while expanding the top-level template)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render a top-level template to normalized text
    pub fn render(&mut self, template: &Template) -> Result<String> {
        self.render_from(template, IndentTracker::new())
    }

    /// Render a top-level template whose first line continues `line`
    pub fn render_from(&mut self, template: &Template, line: IndentTracker) -> Result<String> {
        self.stack.clear();
        self.depth = 0;

        debug!(
            template = template.display_name(),
            column = line.column(),
            "rendering template"
        );

        let ctx = RenderContext::continuing(self.config.strip_whitespace_on_empty_lines, line);
        let segments = trim_layout(template.segments());
        self.push_frame(template, None)?;
        let text = self.walk(&segments, template, ctx)?;
        self.stack.pop();

        debug!(
            template = template.display_name(),
            bytes = text.len(),
            "rendered template"
        );
        Ok(text)
    }

    /// Render a nested template with a fresh context, without normalization
    ///
    /// `include` is the name the template was looked up by, if any.
    pub(crate) fn render_nested(
        &mut self,
        template: &Template,
        include: Option<&str>,
    ) -> Result<String> {
        self.descend()?;
        self.push_frame(template, include)?;

        trace!(
            template = template.display_name(),
            depth = self.depth,
            "expanding nested template"
        );

        let text = self.walk(template.segments(), template, RenderContext::new(false))?;

        self.stack.pop();
        self.ascend();
        Ok(text)
    }

    /// Look up an included template
    pub(crate) fn lookup(&self, name: &str) -> Result<Arc<Template>> {
        self.source
            .and_then(|source| source.template(name))
            .ok_or_else(|| EngineError::UnknownTemplate {
                name: name.to_string(),
            })
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_nesting_depth {
            return Err(EngineError::NestingDepthExceeded {
                depth: self.depth,
                limit: self.config.max_nesting_depth,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn walk<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        template: &Template,
        mut ctx: RenderContext,
    ) -> Result<String> {
        for (i, segment) in segments.iter().enumerate() {
            let indent = ctx.push_literal(segment.as_ref());
            if let Some(value) = template.values().get(i) {
                let lines = ValueResolver::new(self).resolve(value, &indent)?;
                ctx.push_lines(&lines);
            }
        }

        Ok(ctx.finish())
    }

    /// Enter a template, failing if it is already being expanded
    ///
    /// A template is the same as one on the stack if it is the same instance,
    /// or if both were included under the same name (sources may hand out a
    /// fresh copy per lookup).
    fn push_frame(&mut self, template: &Template, include: Option<&str>) -> Result<()> {
        let id = template as *const Template as usize;

        let repeated = self.stack.iter().position(|frame| {
            frame.id == id || (include.is_some() && frame.include.as_deref() == include)
        });

        if let Some(pos) = repeated {
            let mut chain: Vec<String> = self.stack[pos..]
                .iter()
                .map(|frame| frame.name.clone())
                .collect();
            chain.push(template.display_name().to_string());
            return Err(EngineError::CyclicTemplate { chain });
        }

        self.stack.push(Frame {
            id,
            name: template.display_name().to_string(),
            include: include.map(str::to_string),
        });
        Ok(())
    }
}

/// Trim the heredoc-style layout of a top-level template's literal text
fn trim_layout(segments: &[String]) -> Vec<String> {
    let last = segments.len().saturating_sub(1);

    let trimmed: Vec<&str> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let mut text = segment.as_str();
            if i == 0 {
                text = strip_leading_blank_line(text);
            }
            if i == last {
                text = strip_trailing_line_break(text);
            }
            text
        })
        .collect();

    let margin = common_margin(&trimmed);
    trimmed
        .iter()
        .enumerate()
        .map(|(i, segment)| remove_margin(segment, margin, i == 0))
        .collect()
}

fn strip_leading_blank_line(text: &str) -> &str {
    match text.find('\n') {
        Some(pos) if text[..pos].trim().is_empty() => &text[pos + 1..],
        _ => text,
    }
}

fn strip_trailing_line_break(text: &str) -> &str {
    match text.rfind('\n') {
        Some(pos) if text[pos + 1..].trim().is_empty() => {
            let head = &text[..pos];
            head.strip_suffix('\r').unwrap_or(head)
        }
        _ => text,
    }
}

fn is_margin_char(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn leading_margin(line: &str) -> &str {
    let rest = line.trim_start_matches(is_margin_char);
    &line[..line.len() - rest.len()]
}

/// Left margin shared by every non-blank line of the literal text
///
/// A line that runs into a placeholder is non-blank even if its literal part
/// is only whitespace.
fn common_margin<'s>(segments: &[&'s str]) -> &'s str {
    let last = segments.len().saturating_sub(1);
    let mut margin: Option<&'s str> = None;

    for (i, &segment) in segments.iter().enumerate() {
        let starts = std::iter::once(0)
            .filter(|_| i == 0)
            .chain(segment.match_indices('\n').map(|(pos, _)| pos + 1));

        for start in starts {
            let rest = &segment[start..];
            let runs_into_placeholder = i < last && !rest.contains('\n');
            let line = rest.split('\n').next().unwrap_or(rest);

            if runs_into_placeholder || !line.trim().is_empty() {
                let indent = leading_margin(line);
                margin = Some(match margin {
                    None => indent,
                    Some(current) => common_prefix(current, indent),
                });
            }
        }
    }

    margin.unwrap_or("")
}

fn common_prefix<'s>(a: &'s str, b: &str) -> &'s str {
    // margins are ASCII, so any byte index is a char boundary
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Remove `margin` from every line that starts in `segment`
///
/// The first piece of a segment other than the first continues the line of
/// the preceding placeholder and is left alone. Blank lines shorter than the
/// margin lose all their leading whitespace.
fn remove_margin(segment: &str, margin: &str, starts_line: bool) -> String {
    if margin.is_empty() {
        return segment.to_string();
    }

    let mut out = String::with_capacity(segment.len());
    for (i, piece) in segment.split_inclusive('\n').enumerate() {
        if i == 0 && !starts_line {
            out.push_str(piece);
        } else {
            out.push_str(
                piece
                    .strip_prefix(margin)
                    .unwrap_or_else(|| piece.trim_start_matches(is_margin_char)),
            );
        }
    }
    out
}

/// Empty every line that holds only whitespace
pub(crate) fn strip_whitespace_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if !line.trim().is_empty() {
                line
            } else if line.ends_with('\r') {
                "\r"
            } else {
                ""
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
