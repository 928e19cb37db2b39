//! Render command - render every output of a template document

use std::path::Path;

use console::style;
use tracing::debug;

use super::{RenderOptions, load_document};
use crate::error::{CliError, Result};

pub fn run(
    document_path: &Path,
    options: &RenderOptions,
    output_dir: Option<&Path>,
    only: Option<&str>,
) -> Result<()> {
    let document = load_document(document_path)?;

    if let Some(name) = only {
        if !document.outputs().any(|(output, _)| output == name) {
            let known: Vec<_> = document.outputs().map(|(output, _)| output).collect();
            return Err(CliError::usage_with_help(
                format!("Unknown output: {}", name),
                format!("Available outputs: {}", known.join(", ")),
            ));
        }
    }

    let engine = options.engine()?;
    let mut output = engine.render_document(&document)?;

    if let Some(name) = only {
        output.retain(|buffer| buffer == name);
    }

    if let Some(dir) = output_dir {
        for path in output.save_to_dir(dir)? {
            println!("{} {}", style("wrote").green(), path.display());
        }
        return Ok(());
    }

    let mut first = true;
    for buffer in output.buffers() {
        if !first {
            println!();
        }
        first = false;

        debug!(output = buffer.name(), bytes = buffer.contents().len(), "printing output");
        println!("{}", style(format!("# Output: {}", buffer.name())).dim());
        println!("{}", buffer.contents());
    }

    Ok(())
}
