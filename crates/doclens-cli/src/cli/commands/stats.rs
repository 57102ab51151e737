//! Text statistics command.

use std::path::Path;

use console::style;

use doclens::{Config, TextStatisticsEngine};

use crate::cli::helpers::{bar, format_bytes, load_document};

pub async fn cmd_stats(
    config: &Config,
    input: &Path,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let doc = load_document(input).await?;
    let engine = TextStatisticsEngine::new()
        .with_top_words_limit(limit.unwrap_or(config.top_words_limit));
    let stats = engine.compute(&doc.text_content);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        style("→").cyan(),
        style(&doc.filename).bold(),
        style(format!("({})", format_bytes(doc.file_size))).dim()
    );
    println!("  Characters: {}", stats.character_count);
    println!("  Words:      {}", stats.word_count);
    println!("  Sentences:  {}", stats.sentence_count);
    println!("  Paragraphs: {}", stats.paragraph_count);
    println!("  Lines:      {}", stats.line_count);

    if stats.top_words.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", style("Top words").bold());
    let max = stats.max_word_count();
    let width = stats
        .top_words
        .iter()
        .map(|w| w.word.chars().count())
        .max()
        .unwrap_or(0);
    for word in &stats.top_words {
        println!(
            "  {:<width$}  {:>4}  {}",
            word.word,
            word.count,
            style(bar(word.count, max, 20)).cyan(),
            width = width
        );
    }

    Ok(())
}
