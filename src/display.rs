// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style as TableStyle},
    Table, Tabled,
};

use crate::ollama::ModelInfo;

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a failure line on stdout, as part of a report.
pub fn failure(msg: &str) {
    println!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Prints a bold section heading preceded by a blank line.
pub fn heading(title: &str) {
    println!();
    println!("{}", style(title).bold());
}

/// Prints an indented bullet line.
pub fn bullet(msg: &str) {
    println!("   • {}", msg);
}

/// Starts a spinner for a long-running request.
///
/// Hidden automatically when stdout is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Truncates `text` to at most `max_chars` characters, adding `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Formats a byte count with a binary unit.
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Row structure for model table display.
#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Model")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

/// Renders installed models as a table.
pub fn models_table(models: &[ModelInfo]) -> String {
    let rows: Vec<ModelRow> = models
        .iter()
        .enumerate()
        .map(|(i, m)| ModelRow {
            index: i + 1,
            name: m.name.clone(),
            size: m.size.map(human_size).unwrap_or_default(),
            modified: m
                .modified_at
                .as_deref()
                .map(|t| t.chars().take(10).collect())
                .unwrap_or_default(),
        })
        .collect();

    Table::new(rows)
        .with(TableStyle::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string()
}

// INLINE_TEST_REQUIRED: Binary crate without lib.rs - tests cannot be external
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("Oatmeal with berries.", 200), "Oatmeal with berries.");
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        let text = "a".repeat(250);
        let shown = preview(&text, 200);
        assert_eq!(shown.len(), 203);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let text = "b".repeat(200);
        assert_eq!(preview(&text, 200), text);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(preview(&text, 3), "ééé...");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(4_920_753_328), "4.6 GiB");
    }

    #[test]
    fn test_models_table_lists_names() {
        let models = vec![
            ModelInfo {
                name: "llama3.1:8b".to_string(),
                size: Some(4_920_753_328),
                modified_at: Some("2025-07-10T16:50:25.123Z".to_string()),
            },
            ModelInfo {
                name: "tiny".to_string(),
                size: None,
                modified_at: None,
            },
        ];

        let table = models_table(&models);

        assert!(table.contains("llama3.1:8b"));
        assert!(table.contains("tiny"));
        assert!(table.contains("4.6 GiB"));
        assert!(table.contains("2025-07-10"));
    }
}
