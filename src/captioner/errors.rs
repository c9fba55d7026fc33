// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for batch captioning
//!
//! Two tiers:
//! - Fatal errors abort the run before any image is touched (prompt, directory)
//! - Per-image errors are reported and counted, and the run moves on

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating a run or captioning a single image
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Prompt file could not be read
    #[error("Error reading prompt file '{}': {source}", .path.display())]
    PromptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Prompt is empty after trimming whitespace
    #[error("Prompt {origin} is empty")]
    EmptyPrompt { origin: String },

    /// Target path is missing, inaccessible or not a directory
    #[error("Invalid directory '{}': {reason}", .path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    /// Directory listing failed after validation succeeded
    #[error("Failed to read directory '{}': {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read image: {0}")]
    ImageRead(#[source] io::Error),

    /// Update mode could not load the description it was asked to revise
    #[error("failed to read existing txt file: {0}")]
    ExistingFileRead(#[source] io::Error),

    #[error("failed to generate description: {0}")]
    Generation(String),

    /// Add mode found no sidecar to append to at write time
    #[error("failed to open output file for appending: '{}' does not exist", .0.display())]
    AppendTargetMissing(PathBuf),

    #[error("failed to write output file '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CaptionError {
    /// Whether this error terminates the whole run rather than a single image
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CaptionError::PromptRead { .. }
                | CaptionError::EmptyPrompt { .. }
                | CaptionError::InvalidDirectory { .. }
                | CaptionError::DirectoryRead { .. }
        )
    }
}
