// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Strings Tables
//!
//! Key extraction and placeholder generation for `Localizable.strings`
//! tables using the `"key" = "value";` convention. Tables are not parsed
//! into a structure; only the left-hand keys are matched, so escaped quotes
//! inside keys or values are not understood.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Marker comment written before every block of appended placeholders.
pub const AUTO_FILL_MARKER: &str = "/* Auto-filled missing keys */";

/// Matches the key of an assignment up to the opening quote of its value.
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)"\s*=\s*""#).expect("key pattern is valid"));

/// Parses a base key list: one key per line, surrounding whitespace and
/// quotes stripped, blank lines skipped. Order and duplicates are kept.
pub fn parse_key_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().trim_matches(|c| c == '"' || c == ' '))
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads and parses the base key list at `path`.
pub fn load_key_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read base key list {}", path.display()))?;
    Ok(parse_key_list(&content))
}

/// Returns every key that appears on the left of an assignment in `content`.
pub fn existing_keys(content: &str) -> HashSet<&str> {
    KEY_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Returns the base keys absent from `content`, in base-key order.
pub fn missing_keys<'a>(base_keys: &'a [String], content: &str) -> Vec<&'a str> {
    let present = existing_keys(content);
    base_keys
        .iter()
        .map(String::as_str)
        .filter(|key| !present.contains(key))
        .collect()
}

/// Formats one placeholder entry, using the key as its own translation.
pub fn placeholder_line(key: &str) -> String {
    format!("\"{key}\" = \"{key}\";")
}

/// Builds the block appended to a table for the given missing keys.
pub fn placeholder_block(missing: &[&str]) -> String {
    let mut block = format!("\n\n{AUTO_FILL_MARKER}\n");
    for key in missing {
        block.push_str(&placeholder_line(key));
        block.push('\n');
    }
    block
}

/// Appends placeholder entries for `missing` to the table at `path`.
///
/// There is no rollback: a failed write leaves the table as far as it got.
pub fn append_placeholders(path: &Path, missing: &[&str]) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;

    file.write_all(placeholder_block(missing).as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

// INLINE_TEST_REQUIRED: Binary crate without lib.rs - tests cannot be external
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_parse_key_list_strips_whitespace_and_quotes() {
        let parsed = parse_key_list("  GREETING \n\"FAREWELL\"\n\n \" Quoted Key \" \n\t\n");
        assert_eq!(parsed, keys(&["GREETING", "FAREWELL", "Quoted Key"]));
    }

    #[test]
    fn test_parse_key_list_keeps_order_and_duplicates() {
        let parsed = parse_key_list("b\na\nb\n");
        assert_eq!(parsed, keys(&["b", "a", "b"]));
    }

    #[test]
    fn test_parse_key_list_skips_bare_quotes() {
        assert!(parse_key_list("\"\"\n   \n").is_empty());
    }

    #[test]
    fn test_load_key_list_missing_file_errors() {
        let dir = tempdir().unwrap();
        let err = load_key_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read base key list"));
    }

    #[test]
    fn test_existing_keys_ignores_comments_and_blank_lines() {
        let content = "/* Greetings */\n\"GREETING\" = \"Hello\";\n\n// note\n\"Log Out\"=\"Abmelden\";\n";
        let found = existing_keys(content);
        assert_eq!(found.len(), 2);
        assert!(found.contains("GREETING"));
        assert!(found.contains("Log Out"));
    }

    #[test]
    fn test_existing_keys_does_not_treat_values_as_keys() {
        let found = existing_keys("\"a\" = \"b\";\n");
        assert!(found.contains("a"));
        assert!(!found.contains("b"));
    }

    #[test]
    fn test_missing_keys_scenario() {
        let base = keys(&["GREETING", "FAREWELL"]);
        let missing = missing_keys(&base, "\"GREETING\" = \"Hello\";\n");
        assert_eq!(missing, vec!["FAREWELL"]);
    }

    #[test]
    fn test_missing_keys_preserves_base_order() {
        let base = keys(&["c", "a", "b"]);
        assert_eq!(missing_keys(&base, ""), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_placeholder_block_format() {
        let block = placeholder_block(&["FAREWELL", "Save"]);
        assert!(block.starts_with("\n\n/*"));
        assert!(block.ends_with(";\n"));
        insta::assert_snapshot!(block.trim(), @r#"
        /* Auto-filled missing keys */
        "FAREWELL" = "FAREWELL";
        "Save" = "Save";
        "#);
    }

    #[test]
    fn test_append_placeholders_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");
        fs::write(&path, "\"GREETING\" = \"Hello\";\n").unwrap();

        append_placeholders(&path, &["FAREWELL"]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\"GREETING\" = \"Hello\";\n\n\n/* Auto-filled missing keys */\n\"FAREWELL\" = \"FAREWELL\";\n"
        );
    }

    #[test]
    fn test_append_placeholders_matches_block() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");
        fs::write(&path, "").unwrap();

        append_placeholders(&path, &["x", "y"]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), placeholder_block(&["x", "y"]));
    }

    #[test]
    fn test_append_placeholders_missing_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.strings");
        assert!(append_placeholders(&path, &["x"]).is_err());
        assert!(!path.exists());
    }

    // Keys without quotes, backslashes or line breaks, which the key
    // pattern is able to recognize.
    fn key_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_. %@-]{1,16}".prop_filter("trimmed key", |k| {
            k.trim_matches(|c| c == '"' || c == ' ') == k
        })
    }

    proptest! {
        #[test]
        fn prop_appended_table_covers_all_keys(
            base in prop::collection::vec(key_strategy(), 0..12),
            present in prop::collection::vec((key_strategy(), key_strategy()), 0..8),
        ) {
            let original: String = present
                .iter()
                .map(|(k, v)| format!("\"{k}\" = \"{v}\";\n"))
                .collect();
            let missing = missing_keys(&base, &original);
            let updated = format!("{original}{}", placeholder_block(&missing));

            prop_assert!(updated.starts_with(&original));
            let after = existing_keys(&updated);
            for key in base.iter().map(String::as_str).chain(existing_keys(&original)) {
                prop_assert!(after.contains(key), "key {key:?} lost");
            }
            prop_assert!(missing_keys(&base, &updated).is_empty());
        }
    }
}
