// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch captioning run: validate, scan, filter, process each image, summarize

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::errors::CaptionError;
use super::mode::ProcessingMode;
use super::processor::ImageProcessor;
use super::scan::{filter_by_mode, scan_directory};
use super::summary::RunSummary;
use crate::vision::InferenceClient;

/// Write one console line. Failed writes are logged and otherwise ignored.
macro_rules! report {
    ($out:expr) => {
        report!($out, "")
    };
    ($out:expr, $($arg:tt)*) => {
        if let Err(e) = writeln!($out, $($arg)*) {
            debug!("Console write failed: {}", e);
        }
    };
}

/// Settings fixed for the duration of one run
#[derive(Debug, Clone)]
pub struct CaptionOptions {
    pub model: String,
    pub prompt: String,
    pub directory: PathBuf,
    pub mode: ProcessingMode,
}

/// Read the prompt file and trim it. Empty prompts are rejected.
pub async fn load_prompt(path: &Path) -> Result<String, CaptionError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CaptionError::PromptRead {
            path: path.to_path_buf(),
            source,
        })?;

    let prompt = raw.trim();
    if prompt.is_empty() {
        return Err(CaptionError::EmptyPrompt {
            origin: format!("file '{}'", path.display()),
        });
    }
    Ok(prompt.to_string())
}

/// Ensure `path` exists and is a directory
pub async fn validate_directory(path: &Path) -> Result<(), CaptionError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| CaptionError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !metadata.is_dir() {
        return Err(CaptionError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

/// Captions every recognised image in a directory, one at a time
pub struct BatchCaptioner {
    client: Arc<dyn InferenceClient>,
    options: CaptionOptions,
}

impl BatchCaptioner {
    /// Create a captioner. The prompt is trimmed and must not be empty.
    pub fn new(
        client: Arc<dyn InferenceClient>,
        mut options: CaptionOptions,
    ) -> Result<Self, CaptionError> {
        let trimmed = options.prompt.trim();
        if trimmed.is_empty() {
            return Err(CaptionError::EmptyPrompt {
                origin: "text".to_string(),
            });
        }
        options.prompt = trimmed.to_string();

        Ok(Self { client, options })
    }

    pub fn options(&self) -> &CaptionOptions {
        &self.options
    }

    /// Run the batch, reporting progress on stdout.
    ///
    /// Only directory validation and listing can fail the run. Per-image
    /// failures are printed, counted and skipped over.
    pub async fn run(&self) -> Result<RunSummary, CaptionError> {
        self.run_with_output(&mut std::io::stdout()).await
    }

    /// Same as [`run`](Self::run), with the console report written to `out`
    pub async fn run_with_output<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<RunSummary, CaptionError> {
        let dir = self.options.directory.as_path();
        let mode = self.options.mode;

        validate_directory(dir).await?;

        let images = scan_directory(dir).await?;
        let filtered = filter_by_mode(dir, images, mode).await;

        if filtered.skipped > 0 {
            report!(
                out,
                "Skipped {} image(s) without existing txt files.",
                filtered.skipped
            );
        }

        let mut summary = RunSummary {
            skipped: filtered.skipped,
            total: filtered.images.len(),
            ..Default::default()
        };

        if filtered.images.is_empty() {
            if mode.requires_existing_sidecar() {
                report!(
                    out,
                    "No image files with existing txt files found in the directory."
                );
            } else {
                report!(out, "No image files found in the directory.");
            }
            return Ok(summary);
        }

        report!(out, "Found {} image(s) to process.\n", summary.total);
        info!(
            "Captioning {} image(s) in {} (mode={})",
            summary.total,
            dir.display(),
            mode
        );

        let processor = ImageProcessor::new(
            self.client.as_ref(),
            &self.options.model,
            &self.options.prompt,
            mode,
        );

        for (index, name) in filtered.images.iter().enumerate() {
            let image_path = dir.join(name);
            let display_name = name.to_string_lossy();
            report!(
                out,
                "[{}/{}] Processing: {}...",
                index + 1,
                summary.total,
                display_name
            );

            match processor.process(&image_path).await {
                Ok(outcome) => {
                    report!(
                        out,
                        "  ✓ {}: {} ({:.2} sec)",
                        outcome.mode.success_verb(),
                        outcome.sidecar_name(),
                        outcome.elapsed.as_secs_f64()
                    );
                    summary.record_success();
                }
                Err(e) => {
                    debug!("Failed to caption {}: {}", display_name, e);
                    report!(out, "  ❌ Error: {}", e);
                    summary.record_error();
                }
            }
            report!(out);
        }

        report!(out, "{}", "=".repeat(50));
        report!(out, "Processing complete!");
        report!(out, "{}", summary);

        Ok(summary)
    }
}
