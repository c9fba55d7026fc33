// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch image captioning
//!
//! Scans a directory for images, asks an inference client for a description
//! of each one and writes it to a `.txt` sidecar next to the image.

pub mod errors;
pub mod mode;
pub mod processor;
pub mod runner;
pub mod scan;
pub mod summary;

pub use errors::CaptionError;
pub use mode::ProcessingMode;
pub use processor::{build_prompt, write_description, ImageProcessor, ProcessOutcome};
pub use runner::{load_prompt, validate_directory, BatchCaptioner, CaptionOptions};
pub use scan::{
    filter_by_mode, is_image_file, scan_directory, sidecar_path, FilteredImages, IMAGE_EXTENSIONS,
};
pub use summary::RunSummary;
