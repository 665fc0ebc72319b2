//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::FilterSpec;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static PLANE: Emoji<'_, '_> = Emoji("✈️  ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static FILTER: Emoji<'_, '_> = Emoji("🔎 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        PLANE,
        style("FLIGHT DELAY ANALYTICS").cyan().bold()
    );
    println!(
        "    {}",
        style("Delay trends, causes and outliers from a flight CSV").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, output: Option<&Path>, filter: &FilterSpec) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {:<width$}│",
        style("Configuration").cyan().bold(),
        width = box_width - 3
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {}Input:  {:<42}│",
        FOLDER,
        truncate_path(input, 41)
    );
    let output = output
        .map(|p| truncate_path(p, 41))
        .unwrap_or_else(|| "(no export)".to_string());
    println!("    │  {}Output: {:<42}│", SAVE, output);
    println!("    ├{}┤", line);
    for (label, value) in describe_filter(filter) {
        println!(
            "    │  {}{:<9}{:<40}│",
            FILTER,
            label,
            truncate_string(&value, 39)
        );
    }
    println!("    └{}┘", line);
    println!();
}

/// Human-readable description of each filter dimension.
pub fn describe_filter(filter: &FilterSpec) -> Vec<(&'static str, String)> {
    let join = |values: &std::collections::BTreeSet<String>| {
        if values.is_empty() {
            "all".to_string()
        } else {
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };

    let dates = match &filter.date_range {
        Some(range) => format!(
            "{} .. {}",
            range.start.format("%d-%m-%Y"),
            range.end.format("%d-%m-%Y")
        ),
        None => "all".to_string(),
    };

    vec![
        ("Dates:", dates),
        ("Airline:", join(&filter.airlines)),
        ("Origin:", join(&filter.origins)),
        ("Dest:", join(&filter.dests)),
    ]
}

/// Print a section header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {}{}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {}{}",
        PLANE,
        style("Flight delay analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    match detail {
        Some(info) => println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        ),
        None => println!("      Found {} {}", style(count).yellow().bold(), description),
    }
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "...hijkl");
    }

    #[test]
    fn test_describe_filter() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 3, 31).unwrap();
        let filter = FilterSpec::new()
            .with_date_range(start, end)
            .with_airlines(["WN", "AA"]);

        let described = describe_filter(&filter);
        assert_eq!(described[0].1, "01-01-2019 .. 31-03-2019");
        assert_eq!(described[1].1, "AA, WN");
        assert_eq!(described[2].1, "all");
    }
}
