//! Check command - compare rendered outputs against golden files

use std::path::Path;

use console::style;
use quill_engine::{EngineError, GoldenDiff, LineType};

use super::{RenderOptions, load_document};
use crate::error::{CliError, Result};

pub fn run(document_path: &Path, golden_dir: &Path, options: &RenderOptions) -> Result<()> {
    let document = load_document(document_path)?;
    let engine = options.engine()?;
    let rendered = engine.render_document_collect_errors(&document);

    let total = document.outputs().count();
    let mut failed = 0;

    for (name, _) in document.outputs() {
        if let Some(err) = rendered.report.errors_by_output.get(name) {
            println!("  {} {}: {}", style("✗").red(), name, err);
            failed += 1;
            continue;
        }

        match rendered.output.compare_with_file(name, golden_dir) {
            Ok(()) => println!("  {} {}", style("✓").green(), name),
            Err(EngineError::GoldenMismatch { diff, .. }) => {
                println!("  {} {}", style("✗").red(), name);
                print_diff(&diff);
                failed += 1;
            }
            Err(EngineError::Io(e)) => {
                println!(
                    "  {} {}: cannot read {}: {}",
                    style("✗").red(),
                    name,
                    golden_dir.join(name).display(),
                    e
                );
                failed += 1;
            }
            Err(other) => return Err(other.into()),
        }
    }

    println!();
    if failed > 0 {
        return Err(CliError::Mismatch { failed, total });
    }

    println!("{} {} output(s) match", style("✓").green().bold(), total);
    Ok(())
}

fn print_diff(diff: &GoldenDiff) {
    for line in &diff.lines {
        match line.line_type {
            LineType::Removed => println!("    {}", style(format!("-{}", line.content)).red()),
            LineType::Added => println!("    {}", style(format!("+{}", line.content)).green()),
            LineType::Context => println!("    {}", style(format!(" {}", line.content)).dim()),
        }
    }
}
