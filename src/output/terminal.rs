// Colored terminal output for recommendations, sentiment and ratings.
//
// This module only renders; every number it shows was computed elsewhere.

use colored::Colorize;

use crate::catalog::models::ProductRecord;
use crate::ranking::ranker::RecommendationResult;
use crate::sentiment::profile::{SentimentProfile, HISTOGRAM_BINS};

use super::export::{format_score, HEADER};

/// Display ranked recommendations using the export line format.
pub fn display_recommendations(result: &RecommendationResult) {
    println!("\n{}", HEADER.bold());
    if result.is_empty() {
        println!("  {}", "(no other products indexed yet)".dimmed());
        return;
    }
    for rec in result.iter() {
        let line = format!(
            "- {} (Similarity Score: {})",
            super::truncate_chars(&rec.title, 80),
            format_score(rec.score)
        );
        println!("{}", colorize_score(&line, rec.score));
    }
}

/// Display a product's sentiment summary and distribution.
pub fn display_sentiment(title: &str, profile: &SentimentProfile) {
    println!(
        "\n{}",
        format!("=== Sentiment for {} ({} reviews) ===", title, profile.len()).bold()
    );

    if profile.is_empty() {
        println!("  {}", "No reviews to score.".dimmed());
        return;
    }

    match profile.mean() {
        Some(mean) => println!("  Mean compound: {:+.3}", mean),
        None => println!("  Mean compound: {}", "n/a".dimmed()),
    }

    let (pos, neu, neg) = profile.polarity_counts();
    println!(
        "  {} positive  {} neutral  {} negative",
        pos.to_string().green(),
        neu.to_string().normal(),
        neg.to_string().red()
    );
    let degraded = profile.degraded_count();
    if degraded > 0 {
        println!(
            "  {} {} reviews could not be scored",
            "!".yellow(),
            degraded
        );
    }

    display_histogram(profile);
}

/// Ten-bin horizontal histogram of compound scores over [-1, 1].
pub fn display_histogram(profile: &SentimentProfile) {
    let bins = profile.histogram();
    let max = bins.iter().copied().max().unwrap_or(0).max(1);
    let bar_width: usize = 30;

    println!("\n  {}", "Sentiment Distribution".bold());
    for (i, &count) in bins.iter().enumerate() {
        let lower = SentimentProfile::bin_lower_edge(i);
        let upper = if i + 1 == HISTOGRAM_BINS {
            1.0
        } else {
            SentimentProfile::bin_lower_edge(i + 1)
        };
        let filled = (count * bar_width).div_ceil(max);
        let bar = "#".repeat(filled);
        let colored_bar = if upper <= 0.0 {
            bar.red()
        } else if lower >= 0.0 {
            bar.green()
        } else {
            bar.yellow()
        };
        println!(
            "  [{:+.1}, {:+.1}{} {:<width$} {}",
            lower,
            upper,
            if i + 1 == HISTOGRAM_BINS { "]" } else { ")" },
            colored_bar,
            count,
            width = bar_width
        );
    }
}

/// Mean rating per indexed product, as bars out of the highest mean.
pub fn display_ratings(records: &[ProductRecord]) {
    println!("\n{}", "=== Product Ratings ===".bold());
    if records.is_empty() {
        println!("  {}", "No products indexed.".dimmed());
        return;
    }

    let bar_width: usize = 20;
    let top = records
        .iter()
        .filter_map(|r| r.rating_summary().mean)
        .fold(0.0_f64, f64::max);

    for record in records {
        let summary = record.rating_summary();
        let title = super::truncate_chars(&record.title, 40);
        match summary.mean {
            Some(mean) => {
                let filled = if top > 0.0 {
                    ((mean / top) * bar_width as f64).round() as usize
                } else {
                    0
                };
                let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled.min(bar_width)));
                println!(
                    "  {:<43} {} {:.2} ({} ratings, ${:.2})",
                    title,
                    bar.bright_blue(),
                    mean,
                    summary.count,
                    record.price
                );
            }
            None => println!("  {:<43} {}", title, "no ratings".dimmed()),
        }
    }
}

/// Distinctive review terms of a product.
pub fn display_key_terms(title: &str, terms: &[(String, f32)]) {
    if terms.is_empty() {
        return;
    }
    let list: Vec<&str> = terms.iter().map(|(t, _)| t.as_str()).collect();
    println!("\n  Key terms for {}: {}", title.bold(), list.join(", ").dimmed());
}

/// Brighter for closer matches.
fn colorize_score(line: &str, score: f64) -> colored::ColoredString {
    match score {
        s if s >= 0.75 => line.bright_green(),
        s if s >= 0.4 => line.green(),
        s if s > 0.0 => line.normal(),
        _ => line.dimmed(),
    }
}
