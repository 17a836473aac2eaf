// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inference Server Probe
//!
//! Checks that the local Ollama server is reachable and can answer a
//! nutrition question. Liveness runs first; generation is only attempted
//! when liveness succeeds. Failures are reported, never returned as errors.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::commands::guide;
use crate::config::ProbeConfig;
use crate::display;
use crate::ollama::{GenerateOptions, GenerateRequest, ModelInfo, OllamaClient, ProbeError};

/// Characters of the generated answer shown in the report.
const PREVIEW_CHARS: usize = 200;

/// A successful generation.
#[derive(Debug)]
pub struct Generation {
    pub text: String,
    pub elapsed: Duration,
}

/// Result of the two probe steps.
#[derive(Debug)]
pub struct ProbeReport {
    pub liveness: Result<Vec<ModelInfo>, ProbeError>,
    /// `None` when liveness failed and generation was skipped.
    pub generation: Option<Result<Generation, ProbeError>>,
}

impl ProbeReport {
    /// Returns true when the server listed its models and answered.
    pub fn is_ready(&self) -> bool {
        self.liveness.is_ok() && matches!(self.generation, Some(Ok(_)))
    }

    /// Returns true when the server is up but the generation timed out.
    pub fn is_warming_up(&self) -> bool {
        matches!(&self.generation, Some(Err(e)) if e.is_timeout())
    }
}

/// Lists models and reports what the server has installed.
async fn check_liveness(
    client: &OllamaClient,
    config: &ProbeConfig,
) -> Result<Vec<ModelInfo>, ProbeError> {
    display::heading("Testing Ollama connection...");

    let models = match client.list_models(config.liveness_timeout).await {
        Ok(models) => models,
        Err(e) => {
            match &e {
                ProbeError::Status { status, .. } => {
                    display::failure(&format!("Ollama responded with status {status}"))
                }
                other => display::failure(&format!("Could not connect to Ollama: {other}")),
            }
            return Err(e);
        }
    };

    display::success(&format!(
        "Ollama is running with {} models available",
        models.len()
    ));

    if models.is_empty() {
        display::warning(&format!(
            "No models installed. Run: ollama pull {}",
            config.model
        ));
    } else {
        println!("{}", display::models_table(&models));
        if !models.iter().any(|m| m.name == config.model) {
            display::warning(&format!(
                "Model {} is not installed. Run: ollama pull {}",
                config.model, config.model
            ));
        }
    }

    Ok(models)
}

/// Sends the nutrition prompt and reports the answer or the failure.
async fn check_generation(
    client: &OllamaClient,
    config: &ProbeConfig,
) -> Result<Generation, ProbeError> {
    display::heading("Testing AI nutrition response...");

    let request = GenerateRequest {
        model: &config.model,
        prompt: &config.prompt,
        stream: false,
        options: GenerateOptions {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        },
    };

    let spinner = display::spinner("Sending request to AI...");
    let started = Instant::now();
    let result = client.generate(&request, config.generation_timeout).await;
    let elapsed = started.elapsed();
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            let text = text.trim().to_string();
            display::success(&format!(
                "AI responded in {:.1} seconds",
                elapsed.as_secs_f64()
            ));
            display::info(&format!(
                "Response: {}",
                display::preview(&text, PREVIEW_CHARS)
            ));
            Ok(Generation { text, elapsed })
        }
        Err(ProbeError::Timeout(limit)) => {
            display::warning(&format!(
                "AI request timed out after {}s - this is normal for the first request",
                limit.as_secs()
            ));
            display::bullet("Try again in a few minutes as the model warms up");
            Err(ProbeError::Timeout(limit))
        }
        Err(ProbeError::Status { status, body }) => {
            display::failure(&format!("AI request failed with status {status}"));
            display::info(&format!("Response: {body}"));
            Err(ProbeError::Status { status, body })
        }
        Err(e) => {
            display::failure(&format!("AI request failed: {e}"));
            Err(e)
        }
    }
}

/// Runs liveness then, if it passed, generation.
pub async fn probe(config: &ProbeConfig) -> ProbeReport {
    let client = match OllamaClient::new(&config.base_url) {
        Ok(client) => client,
        Err(e) => {
            display::failure(&format!("Could not create HTTP client: {e}"));
            return ProbeReport {
                liveness: Err(e),
                generation: None,
            };
        }
    };

    log::info!("probing {} with model {}", config.base_url, config.model);

    let liveness = check_liveness(&client, config).await;
    let generation = match liveness {
        Ok(_) => Some(check_generation(&client, config).await),
        Err(_) => {
            log::debug!("liveness failed, skipping generation");
            None
        }
    };

    ProbeReport {
        liveness,
        generation,
    }
}

/// Prints the final readiness summary.
pub fn print_summary(report: &ProbeReport) {
    if report.is_ready() {
        display::heading("Your AI nutrition system is ready!");
        display::bullet("Ollama server: running");
        display::bullet("AI model: available");
        if let Some(Ok(generation)) = &report.generation {
            display::bullet(&format!(
                "Response time: {:.1}s ({} characters)",
                generation.elapsed.as_secs_f64(),
                generation.text.chars().count()
            ));
        }
        display::bullet("App integration: complete");
        return;
    }

    display::heading("AI connection needs attention");
    display::bullet("App will use fallback knowledge base");
    if report.is_warming_up() {
        display::bullet("Server is up but the model is still warming up");
        display::bullet("Wait a few minutes and run the probe again");
    } else {
        display::bullet("Try: ollama serve (in separate terminal)");
        display::bullet("Wait a few minutes for model to warm up");
    }
}

/// Probe the server, print the app guide and the summary.
///
/// Always succeeds; the outcome is only reported.
pub async fn run(config: &ProbeConfig) -> Result<()> {
    println!("Senior Nutrition App - AI System Test");

    let report = probe(config).await;
    guide::print();
    print_summary(&report);

    Ok(())
}
