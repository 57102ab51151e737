//! Highlighted text rendering.

use console::style;

use doclens::services::styles::category_label;
use doclens::services::ParsedEntityMap;
use doclens::{Config, EntityHighlighter, Segment};

use super::InputArgs;
use crate::cli::helpers::{load_input, styled};

pub async fn cmd_highlight(
    config: &Config,
    input: &InputArgs,
    category: Option<&str>,
    dark: bool,
    json: bool,
) -> anyhow::Result<()> {
    let doc = load_input(input).await?;
    let parsed = doc.entity_map().unwrap_or_else(|e| {
        eprintln!("{} Ignoring entities: {}", style("!").yellow(), e);
        ParsedEntityMap::default()
    });
    for rejected in &parsed.rejected {
        eprintln!("{} {}", style("!").yellow(), rejected);
    }

    let highlighter = EntityHighlighter::with_styles(config.category_styles());
    let segmentation = highlighter.segment(&doc.text_content, &parsed.map, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&segmentation)?);
        return Ok(());
    }

    let mut out = String::new();
    for segment in segmentation.segments() {
        match segment {
            Segment::Tagged {
                text, style: key, ..
            } => {
                out.push_str(&styled(text, key).to_string());
            }
            Segment::Plain { text } => out.push_str(text),
        }
    }
    println!("{}", out);

    let categories = segmentation.categories();
    if categories.is_empty() {
        return Ok(());
    }

    println!();
    for category in categories {
        let key = highlighter.styles().style_key(category);
        let color = highlighter.styles().style(category).color(dark);
        println!(
            "  {} {}",
            styled("●", &key),
            style(format!("{}  {}", category_label(category), color)).dim()
        );
    }

    Ok(())
}
