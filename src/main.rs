// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Nutrition Devkit
//!
//! Developer utilities for the Senior Nutrition app: fill localization gaps
//! and smoke-test the local inference server.

mod commands;
mod config;
mod display;
mod ollama;
mod strings_table;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use config::{CliConfig, ProbeConfig, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};

#[derive(Parser)]
#[command(name = "devkit")]
#[command(version, about = "Developer utilities for the Senior Nutrition app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository root holding base_keys.txt and the app project
    #[arg(long, global = true, env = "DEVKIT_ROOT", default_value = ".")]
    root: PathBuf,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Localizable.strings maintenance
    #[command(subcommand)]
    L10n(L10nCommands),

    /// Smoke-test the local Ollama server
    Probe {
        /// Server base URL
        #[arg(long, env = "DEVKIT_OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
        url: String,

        /// Model used for the generation check
        #[arg(long, env = "DEVKIT_OLLAMA_MODEL", default_value = DEFAULT_OLLAMA_MODEL)]
        model: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum L10nCommands {
    /// Append English placeholders for missing keys
    Fill(L10nArgs),

    /// Report missing keys without writing (non-zero exit on gaps)
    Check(L10nArgs),
}

#[derive(Args)]
struct L10nArgs {
    /// Base key list (default: <root>/base_keys.txt)
    #[arg(long)]
    base_keys: Option<PathBuf>,

    /// Directory containing the <lang>.lproj folders (default: <root>/SeniorNutritionApp)
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Target languages, comma separated (default: he,de,fr,es)
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig { root: cli.root };

    match cli.command {
        Commands::L10n(cmd) => match cmd {
            L10nCommands::Fill(args) => {
                let l10n = config.localization(args.base_keys, args.project_dir, args.languages);
                commands::localize::fill(&l10n)?;
            }
            L10nCommands::Check(args) => {
                let l10n = config.localization(args.base_keys, args.project_dir, args.languages);
                commands::localize::check(&l10n)?;
            }
        },
        Commands::Probe { url, model } => {
            commands::probe::run(&ProbeConfig::new(&url, &model)).await?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "devkit", &mut io::stdout());
        }
    }

    Ok(())
}

// INLINE_TEST_REQUIRED: Binary crate without lib.rs - tests cannot be external
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_languages_split_on_commas() {
        let cli = Cli::try_parse_from(["devkit", "l10n", "fill", "--languages", "de,it"]).unwrap();
        match cli.command {
            Commands::L10n(L10nCommands::Fill(args)) => {
                assert_eq!(args.languages, vec!["de", "it"]);
            }
            _ => panic!("expected l10n fill"),
        }
    }
}
