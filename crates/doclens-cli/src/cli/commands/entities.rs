//! Entity summary command.

use console::style;

use doclens::services::report::{DocumentReport, ReportOptions};
use doclens::{Config, EntityHighlighter};

use super::InputArgs;
use crate::cli::helpers::{load_input, styled};

pub async fn cmd_entities(
    config: &Config,
    input: &InputArgs,
    preview: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let doc = load_input(input).await?;

    let options = ReportOptions {
        summary_preview: preview.unwrap_or(config.summary_preview),
        ..config.report_options()
    };
    let highlighter = EntityHighlighter::with_styles(config.category_styles());
    let report = DocumentReport::build(&doc, &highlighter, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.entities)?);
        return Ok(());
    }

    for rejected in &report.rejected {
        eprintln!("{} {}", style("!").yellow(), rejected);
    }

    if report.entities.is_empty() {
        println!("{} No entities found in {}", style("!").yellow(), doc.filename);
        return Ok(());
    }

    let total: usize = report.entities.iter().map(|e| e.entries).sum();
    println!(
        "{} {} entities in {} categories",
        style("→").cyan(),
        total,
        report.entities.len()
    );

    for entity in &report.entities {
        let mut line = entity.preview.join(", ");
        if entity.remaining > 0 {
            line.push_str(&format!(" +{} more", entity.remaining));
        }
        println!(
            "  {} {} {}",
            styled(&entity.label, &entity.style),
            style(format!("({} found in text)", entity.occurrences)).dim(),
            line
        );
    }

    Ok(())
}
