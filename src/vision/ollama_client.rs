// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ollama client for vision captioning via the streaming `/api/generate` API

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::BytesMut;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info};

use super::inference::{GenerateRequest, InferenceClient};

// --- Ollama serde structs ---

#[derive(serde::Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<String>,
    stream: bool,
}

/// One line of the newline-delimited JSON response
#[derive(serde::Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a locally running Ollama server
pub struct OllamaClient {
    client: Client,
    endpoint: String,
}

impl OllamaClient {
    /// Create a new Ollama client.
    ///
    /// No request timeout is set: generation on large models can take
    /// minutes per image.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        url::Url::parse(&endpoint)
            .with_context(|| format!("invalid inference endpoint '{}'", endpoint))?;

        let client = Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        info!("Ollama client configured: endpoint={}", endpoint);

        Ok(Self { client, endpoint })
    }

    /// Get the endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check if the Ollama server answers on its root path
    pub async fn health_check(&self) -> bool {
        match self.client.get(format!("{}/", self.endpoint)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let body = OllamaGenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            images: request.images.iter().map(|img| STANDARD.encode(img)).collect(),
            stream: true,
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Ollama generate POST {} (model={})", url, request.model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(anyhow!("inference service returned {}: {}", status, message));
        }

        let mut stream = response.bytes_stream();
        let mut buffer = BytesMut::new();
        let mut output = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("failed to read response stream")?;
            buffer.extend_from_slice(&chunk);

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line = buffer.split_to(pos + 1);
                if apply_line(&line, &mut output)? {
                    return Ok(output);
                }
            }
        }

        // Stream closed without a trailing newline
        if !buffer.is_empty() {
            apply_line(&buffer, &mut output)?;
        }

        Ok(output)
    }
}

/// Append one NDJSON line to `output`. Returns true on the final chunk.
fn apply_line(line: &[u8], output: &mut String) -> Result<bool> {
    let line = std::str::from_utf8(line).context("response line is not valid UTF-8")?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(false);
    }

    let chunk: GenerateChunk =
        serde_json::from_str(line).with_context(|| format!("malformed response line: {}", line))?;

    if let Some(error) = chunk.error {
        return Err(anyhow!(error));
    }

    output.push_str(&chunk.response);
    Ok(chunk.done)
}
