//! Inspect command - summarize the templates and outputs of a document

use std::path::Path;

use console::style;

use super::load_document;
use crate::error::Result;

pub fn run(document_path: &Path) -> Result<()> {
    let document = load_document(document_path)?;

    println!("{}", style("Templates").cyan().bold());
    for (name, template) in document.templates() {
        let includes: Vec<&str> = template
            .values()
            .iter()
            .flat_map(|value| value.includes())
            .collect();

        println!(
            "  {:24} {} segment(s), {} placeholder(s)",
            name,
            template.segments().len(),
            template.placeholder_count()
        );
        if !includes.is_empty() {
            println!("  {:24} {} {}", "", style("includes").dim(), includes.join(", "));
        }
    }

    println!();
    println!("{}", style("Outputs").cyan().bold());
    for (output, template) in document.outputs() {
        println!("  {:24} {} {}", output, style("<-").dim(), template);
    }

    Ok(())
}
