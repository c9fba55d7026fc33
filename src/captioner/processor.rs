// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-image captioning: read, build prompt, infer, write

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::errors::CaptionError;
use super::mode::ProcessingMode;
use super::scan::sidecar_path;
use crate::vision::{GenerateRequest, InferenceClient};

/// Separator written before each description appended in Add mode
pub const APPEND_SEPARATOR: &str = "\n\n";

/// What happened to one successfully captioned image
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub sidecar: PathBuf,
    pub elapsed: Duration,
    pub mode: ProcessingMode,
}

impl ProcessOutcome {
    /// Sidecar file name for console output
    pub fn sidecar_name(&self) -> String {
        self.sidecar
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.sidecar.display().to_string())
    }
}

/// Prompt sent to the model.
///
/// Update mode appends the trimmed existing description and asks the model
/// to revise it. Other modes use the prompt as given.
pub fn build_prompt(prompt: &str, mode: ProcessingMode, existing: Option<&str>) -> String {
    match (mode, existing) {
        (ProcessingMode::Update, Some(existing)) => format!(
            "{}\n\nExisting description:\n{}\n\nPlease update and improve the above description.",
            prompt,
            existing.trim()
        ),
        _ => prompt.to_string(),
    }
}

/// Write `description` to `sidecar` using the mode's write semantics.
///
/// Default and Update truncate the file. Add appends to a file that must
/// already exist.
pub async fn write_description(
    sidecar: &Path,
    description: &str,
    mode: ProcessingMode,
) -> Result<(), CaptionError> {
    let write_error = |source| CaptionError::OutputWrite {
        path: sidecar.to_path_buf(),
        source,
    };

    let (mut file, content) = match mode {
        ProcessingMode::Add => {
            let file = OpenOptions::new()
                .append(true)
                .open(sidecar)
                .await
                .map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => {
                        CaptionError::AppendTargetMissing(sidecar.to_path_buf())
                    }
                    _ => write_error(e),
                })?;
            (file, format!("{}{}", APPEND_SEPARATOR, description))
        }
        ProcessingMode::Default | ProcessingMode::Update => {
            let file = tokio::fs::File::create(sidecar).await.map_err(write_error)?;
            (file, description.to_string())
        }
    };

    file.write_all(content.as_bytes()).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;
    Ok(())
}

/// Runs the per-image routine against an inference client
pub struct ImageProcessor<'a> {
    client: &'a dyn InferenceClient,
    model: &'a str,
    prompt: &'a str,
    mode: ProcessingMode,
}

impl<'a> ImageProcessor<'a> {
    pub fn new(
        client: &'a dyn InferenceClient,
        model: &'a str,
        prompt: &'a str,
        mode: ProcessingMode,
    ) -> Self {
        Self {
            client,
            model,
            prompt,
            mode,
        }
    }

    /// Caption one image and write its sidecar.
    ///
    /// Every failure is confined to this image; the caller decides how to
    /// report it.
    pub async fn process(&self, image_path: &Path) -> Result<ProcessOutcome, CaptionError> {
        let start = Instant::now();

        let image = tokio::fs::read(image_path)
            .await
            .map_err(CaptionError::ImageRead)?;

        let sidecar = sidecar_path(image_path);

        let existing = match self.mode {
            ProcessingMode::Update => Some(
                tokio::fs::read_to_string(&sidecar)
                    .await
                    .map_err(CaptionError::ExistingFileRead)?,
            ),
            _ => None,
        };
        let prompt = build_prompt(self.prompt, self.mode, existing.as_deref());

        debug!(
            "Generating description for {} ({} bytes)",
            image_path.display(),
            image.len()
        );
        let request = GenerateRequest::new(self.model, prompt, image);
        let description = self
            .client
            .generate(&request)
            .await
            .map_err(|e| CaptionError::Generation(format!("{:#}", e)))?;

        write_description(&sidecar, &description, self.mode).await?;

        Ok(ProcessOutcome {
            sidecar,
            elapsed: start.elapsed(),
            mode: self.mode,
        })
    }
}
