// Colored terminal summary of an analysis result.
//
// Only the scalar parts are printed; the images go to files (see `files`).

use colored::Colorize;

use crate::error::ErrorEnvelope;
use crate::pipeline::AnalysisResult;

/// Widest term shown in a table column before truncation.
const TERM_WIDTH: usize = 24;

/// Print the sentiment split, top terms, topics and most central words.
pub fn display_summary(result: &AnalysisResult) {
    let summary = &result.sentiment_summary;
    println!(
        "\n{}",
        format!("=== Sentiment ({} records) ===", summary.total()).bold()
    );
    println!(
        "  {} {}   {} {}   {} {}",
        "Positive:".green(),
        summary.positive,
        "Negative:".red(),
        summary.negative,
        "Neutral:".dimmed(),
        summary.neutral,
    );
    if !result.sentiments.is_empty() {
        let mean = result.sentiments.iter().sum::<f64>() / result.sentiments.len() as f64;
        println!("  Mean polarity: {}", colorize_polarity(mean));
    }

    display_ranked("Top TF-IDF terms", "Score", &result.tfidf);

    println!("\n{}", "=== Topics ===".bold());
    for (i, terms) in result.topics.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, terms.join(", "));
    }

    display_ranked("Most central words", "Centrality", &result.centralities);

    println!(
        "\n  Co-occurrence graph: {} nodes, {} edges",
        result.network.nodes.len(),
        result.network.edges.len()
    );
}

fn display_ranked(title: &str, score_label: &str, rows: &[(String, f64)]) {
    println!("\n{}", format!("=== {title} ===").bold());
    if rows.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    println!(
        "  {:>4}  {:<27} {:>10}",
        "Rank".dimmed(),
        "Term".dimmed(),
        score_label.dimmed(),
    );
    println!("  {}", "-".repeat(44).dimmed());
    for (i, (term, score)) in rows.iter().enumerate() {
        println!(
            "  {:>4}. {:<27} {:>10.4}",
            i + 1,
            super::truncate_chars(term, TERM_WIDTH),
            score
        );
    }
}

/// Print a failed run the way callers see it: kind plus message.
pub fn display_error(envelope: &ErrorEnvelope) {
    eprintln!(
        "{} {}: {}",
        "Analysis failed".red().bold(),
        envelope.kind.yellow(),
        envelope.message
    );
}

/// Colorize a polarity by the sentiment band it falls in.
fn colorize_polarity(score: f64) -> colored::ColoredString {
    let text = format!("{score:+.3}");
    if score > crate::sentiment::NEUTRAL_BAND {
        text.green()
    } else if score < -crate::sentiment::NEUTRAL_BAND {
        text.red()
    } else {
        text.dimmed()
    }
}
