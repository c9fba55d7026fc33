// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::captioner::{
    load_prompt, validate_directory, BatchCaptioner, CaptionOptions, ProcessingMode,
};
use crate::config::ClientConfig;
use crate::vision::OllamaClient;

/// Arguments for a captioning run
#[derive(Args, Debug)]
pub struct CaptionArgs {
    /// Vision model to run (e.g., glm4-v-flash, llava)
    pub model: String,

    /// File holding the prompt sent with every image
    pub prompt_file: PathBuf,

    /// Directory to scan for images
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Append new description to existing txt files (skip if file doesn't exist)
    #[arg(long, conflicts_with = "update")]
    pub add: bool,

    /// Update existing descriptions using the model (skip if file doesn't exist)
    #[arg(long, conflicts_with = "add")]
    pub update: bool,

    /// Ollama server address (host, host:port or URL)
    #[arg(long, env = "OLLAMA_HOST")]
    pub host: Option<String>,
}

impl CaptionArgs {
    /// Processing mode selected by the flags
    pub fn mode(&self) -> Result<ProcessingMode> {
        ProcessingMode::from_flags(self.add, self.update)
            .ok_or_else(|| anyhow!("--add and --update flags cannot be used together"))
    }

    /// Inference client configuration, `--host` taking precedence over the environment
    pub fn client_config(&self) -> ClientConfig {
        match self.host.as_deref() {
            Some(host) => ClientConfig::from_host(host),
            None => ClientConfig::from_env(),
        }
    }
}

/// Caption every image in the requested directory
pub async fn caption_directory(args: CaptionArgs) -> Result<()> {
    let mode = args.mode()?;

    let prompt = load_prompt(&args.prompt_file).await?;
    validate_directory(&args.directory).await?;

    println!("Using model: {}", args.model);
    println!("Using prompt: {}", prompt);
    println!("Processing images in directory: {}", args.directory.display());
    println!("Mode: {}\n", mode.description());

    let config = args.client_config();
    let client = OllamaClient::new(&config.endpoint).context(
        "Failed to create Ollama client. Make sure Ollama is installed and running.",
    )?;

    if !client.health_check().await {
        warn!(
            "Ollama server at {} is not responding; images will fail until it is up",
            client.endpoint()
        );
    }

    let captioner = BatchCaptioner::new(
        Arc::new(client),
        CaptionOptions {
            model: args.model,
            prompt,
            directory: args.directory,
            mode,
        },
    )?;

    captioner.run().await?;
    Ok(())
}
