// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ollama Client
//!
//! Minimal client for the two inference server endpoints the probe uses:
//! `GET /api/tags` and non-streaming `POST /api/generate`.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a single probe request. None of these are fatal to the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    Connect(String),

    #[error("server responded with status {status}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl ProbeError {
    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout)
        } else if err.is_connect() {
            ProbeError::Connect(error_chain(&err))
        } else if err.is_decode() {
            ProbeError::Decode(error_chain(&err))
        } else {
            ProbeError::Request(error_chain(&err))
        }
    }

    /// Returns true for the timeout case.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout(_))
    }
}

/// Joins an error with its sources so the root cause is visible.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Body of `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// One installed model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Non-streaming generation result; only the text is used.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// HTTP client bound to one inference server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProbeError::Request(error_chain(&e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Lists installed models. Only HTTP 200 counts as success.
    pub async fn list_models(&self, timeout: Duration) -> Result<Vec<ModelInfo>, ProbeError> {
        let url = self.url("/api/tags");
        log::debug!("GET {url} (timeout {timeout:?})");

        let response = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Status { status, body });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, timeout))?;
        Ok(tags.models)
    }

    /// Runs a non-streaming generation and returns the response text.
    pub async fn generate(
        &self,
        request: &GenerateRequest<'_>,
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        let url = self.url("/api/generate");
        log::debug!("POST {url} model={} (timeout {timeout:?})", request.model);

        let response = self
            .http
            .post(&url)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Status { status, body });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, timeout))?;
        Ok(generated.response)
    }
}
