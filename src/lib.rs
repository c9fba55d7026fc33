// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod captioner;
pub mod cli;
pub mod config;
pub mod vision;

pub use captioner::{
    BatchCaptioner, CaptionError, CaptionOptions, ProcessingMode, RunSummary,
};
pub use config::ClientConfig;
pub use vision::{GenerateRequest, InferenceClient, OllamaClient};
