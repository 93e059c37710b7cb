// Colored terminal output for stats tables, topics and corpus samples.

use colored::Colorize;

use crate::corpus::nst::NstSample;
use crate::store::topics::{TopicModel, Topics};

/// Display a stats table as aligned label/value rows.
pub fn display_stats_table(title: &str, table: &[(&str, f64)]) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();

    println!("  {:<24} {:>12}", "Stat".dimmed(), "Value".dimmed());
    println!("  {}", "-".repeat(37).dimmed());

    for (label, value) in table {
        // Counts print as integers, averages with two decimals
        let formatted = if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        };
        println!("  {:<24} {:>12}", label, formatted.bold());
    }
    println!();
}

/// Display topics with their ranked words.
pub fn display_topics(topics: &Topics, model: &TopicModel) {
    if topics.is_empty() {
        println!("No topics in file.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Topics: {} ({} topics) ===", model, topics.len()).bold()
    );
    println!();

    for (id, words) in topics {
        let preview = super::truncate_chars(&words.join(", "), 100);
        println!("  {:>4}. {}", id.to_string().bold(), preview.dimmed());
    }
    println!();
}

/// Display a one-line summary per sampled program.
pub fn display_sample_summary(sample: &NstSample) {
    if sample.is_empty() {
        println!("No NST files loaded.");
        return;
    }

    println!(
        "\n{}",
        format!("=== NST sample ({} programs) ===", sample.len()).bold()
    );
    println!();

    println!(
        "  {:<40} {:>6}  {}",
        "File".dimmed(),
        "Rows".dimmed(),
        "Columns".dimmed()
    );
    println!("  {}", "-".repeat(70).dimmed());

    for (name, table) in sample {
        let columns = super::truncate_chars(&table.headers.join(", "), 30);
        println!(
            "  {:<40} {:>6}  {}",
            super::truncate_chars(name, 40),
            table.len(),
            columns.dimmed()
        );
    }

    let total_rows: usize = sample.values().map(|t| t.len()).sum();
    println!();
    println!("  {} subtitle rows in total", total_rows.to_string().green());
}
