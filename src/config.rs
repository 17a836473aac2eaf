// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

/// Languages that receive placeholder entries when none are given.
pub const DEFAULT_LANGUAGES: &[&str] = &["he", "de", "fr", "es"];

/// App project directory, relative to the root.
const PROJECT_DIR_NAME: &str = "SeniorNutritionApp";

/// Base key list, relative to the root.
const BASE_KEYS_FILE_NAME: &str = "base_keys.txt";

/// File name of every per-language strings table.
pub const STRINGS_FILE_NAME: &str = "Localizable.strings";

/// Language directory holding the template strings table.
const TEMPLATE_LANGUAGE: &str = "Base";

/// Default inference server address.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model used for the generation check.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";

const NUTRITION_PROMPT: &str = "You are a senior nutrition specialist. Give a brief answer (2-3 sentences) to this question:

What should a 70-year-old with diabetes eat for breakfast?

Keep it practical and specific.";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Repository root the default paths are resolved against.
    pub root: PathBuf,
}

impl CliConfig {
    /// Returns the default base key list path.
    pub fn base_keys_path(&self) -> PathBuf {
        self.root.join(BASE_KEYS_FILE_NAME)
    }

    /// Returns the default app project directory.
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR_NAME)
    }

    /// Builds the localization settings, filling unset values from the root.
    pub fn localization(
        &self,
        base_keys: Option<PathBuf>,
        project_dir: Option<PathBuf>,
        languages: Vec<String>,
    ) -> LocalizationConfig {
        let languages = if languages.is_empty() {
            DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            languages
        };

        LocalizationConfig {
            base_keys: base_keys.unwrap_or_else(|| self.base_keys_path()),
            project_dir: project_dir.unwrap_or_else(|| self.project_dir()),
            languages,
        }
    }
}

/// Settings for the localization commands.
#[derive(Debug, Clone)]
pub struct LocalizationConfig {
    /// Plain-text list of expected keys.
    pub base_keys: PathBuf,
    /// Directory containing the `<lang>.lproj` folders.
    pub project_dir: PathBuf,
    /// Target languages, processed in order.
    pub languages: Vec<String>,
}

impl LocalizationConfig {
    /// Returns the `.lproj` directory for a language.
    pub fn lproj_dir(&self, lang: &str) -> PathBuf {
        self.project_dir.join(format!("{lang}.lproj"))
    }

    /// Returns the strings table for a language.
    pub fn strings_file(&self, lang: &str) -> PathBuf {
        self.lproj_dir(lang).join(STRINGS_FILE_NAME)
    }

    /// Returns the base-language template used to seed new tables.
    pub fn template_path(&self) -> PathBuf {
        self.strings_file(TEMPLATE_LANGUAGE)
    }

    /// Returns true if the base key list exists.
    pub fn has_base_keys(&self) -> bool {
        self.base_keys.exists()
    }
}

/// Settings for the inference server probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Server base URL; the client trims any trailing slash.
    pub base_url: String,
    /// Model requested for the generation check.
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Bound on the model-list request.
    pub liveness_timeout: Duration,
    /// Bound on the generation request.
    pub generation_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            prompt: NUTRITION_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: 150,
            liveness_timeout: Duration::from_secs(5),
            generation_timeout: Duration::from_secs(60),
        }
    }
}

impl ProbeConfig {
    /// Creates probe settings for a server URL and model.
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            model: model.to_string(),
            ..Self::default()
        }
    }
}
