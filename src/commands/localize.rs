// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Localization Commands
//!
//! Fill missing keys in the per-language `Localizable.strings` tables with
//! English placeholders, or report the gaps without writing.

use std::fs;

use anyhow::{bail, Context, Result};

use crate::config::LocalizationConfig;
use crate::display;
use crate::strings_table;

/// What a fill pass did to one language's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// The table did not exist and was created, seeded from the template
    /// when one was available.
    Created { from_template: bool },
    /// Every base key was already present.
    Complete,
    /// Placeholders were appended for this many keys.
    Filled { added: usize },
}

/// Loads the base key list, failing if it is absent.
fn load_base_keys(config: &LocalizationConfig) -> Result<Vec<String>> {
    if !config.has_base_keys() {
        bail!("{} not found", config.base_keys.display());
    }
    let keys = strings_table::load_key_list(&config.base_keys)?;
    log::debug!(
        "loaded {} base keys from {}",
        keys.len(),
        config.base_keys.display()
    );
    Ok(keys)
}

/// Creates a missing table, copying the template verbatim if it exists.
fn create_table(config: &LocalizationConfig, lang: &str) -> Result<FillOutcome> {
    let lproj_dir = config.lproj_dir(lang);
    fs::create_dir_all(&lproj_dir)
        .with_context(|| format!("Failed to create {}", lproj_dir.display()))?;

    let path = config.strings_file(lang);
    let template = config.template_path();

    if template.exists() {
        fs::copy(&template, &path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                template.display(),
                path.display()
            )
        })?;
        Ok(FillOutcome::Created {
            from_template: true,
        })
    } else {
        fs::File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(FillOutcome::Created {
            from_template: false,
        })
    }
}

/// Brings one language's table up to date with the base keys.
pub fn fill_language(
    config: &LocalizationConfig,
    lang: &str,
    base_keys: &[String],
) -> Result<FillOutcome> {
    let path = config.strings_file(lang);

    if !path.exists() {
        return create_table(config, lang);
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let missing = strings_table::missing_keys(base_keys, &content);

    if missing.is_empty() {
        return Ok(FillOutcome::Complete);
    }

    log::debug!("{lang}: appending {:?}", missing);
    strings_table::append_placeholders(&path, &missing)?;

    Ok(FillOutcome::Filled {
        added: missing.len(),
    })
}

/// Fills every configured language, reporting each outcome.
pub fn fill(config: &LocalizationConfig) -> Result<Vec<(String, FillOutcome)>> {
    let base_keys = load_base_keys(config)?;
    let mut outcomes = Vec::with_capacity(config.languages.len());

    for lang in &config.languages {
        let outcome = fill_language(config, lang, &base_keys)?;

        match &outcome {
            FillOutcome::Created {
                from_template: true,
            } => display::info(&format!(
                "{lang}: creating new Localizable.strings from Base"
            )),
            FillOutcome::Created {
                from_template: false,
            } => display::info(&format!("{lang}: creating empty Localizable.strings")),
            FillOutcome::Complete => display::info(&format!("{lang}: no missing keys")),
            FillOutcome::Filled { added } => {
                display::info(&format!("{lang}: adding {added} keys"))
            }
        }

        outcomes.push((lang.clone(), outcome));
    }

    display::success("Localization files updated.");
    Ok(outcomes)
}

/// Reports missing keys per language without modifying anything.
///
/// Fails when any language has a gap or no table at all.
pub fn check(config: &LocalizationConfig) -> Result<()> {
    let base_keys = load_base_keys(config)?;
    let mut incomplete = 0;

    for lang in &config.languages {
        let path = config.strings_file(lang);

        if !path.exists() {
            display::warning(&format!("{lang}: Localizable.strings missing"));
            incomplete += 1;
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let missing = strings_table::missing_keys(&base_keys, &content);

        if missing.is_empty() {
            display::success(&format!("{lang}: complete"));
            continue;
        }

        incomplete += 1;
        display::warning(&format!("{lang}: {} missing keys", missing.len()));
        for key in missing {
            println!("    {key}");
        }
    }

    if incomplete > 0 {
        bail!(
            "{incomplete} of {} languages need attention. Run 'devkit l10n fill' to add placeholders.",
            config.languages.len()
        );
    }

    display::success("All localization files are complete.");
    Ok(())
}
