//! Full JSON report command.

use doclens::services::report::{DocumentReport, ReportOptions};
use doclens::{Config, EntityHighlighter};

use super::InputArgs;
use crate::cli::helpers::load_input;

pub async fn cmd_report(
    config: &Config,
    input: &InputArgs,
    category: Option<String>,
) -> anyhow::Result<()> {
    let doc = load_input(input).await?;

    let options = ReportOptions {
        active_category: category,
        ..config.report_options()
    };
    let highlighter = EntityHighlighter::with_styles(config.category_styles());
    let report = DocumentReport::build(&doc, &highlighter, &options);

    tracing::info!(
        "Built report for {} ({} segments, {} entity categories)",
        report.filename,
        report.segments.len(),
        report.entities.len()
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
