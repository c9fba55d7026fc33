// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inference capability used by the batch captioner

use anyhow::Result;

/// A single generate call: one prompt plus the raw bytes of each image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub images: Vec<Vec<u8>>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            images: vec![image],
        }
    }
}

/// Anything that turns a prompt and an image into generated text.
///
/// Implementations must wait for the full response and return the
/// concatenated text; callers never see partial output.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}
