// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision inference module
//!
//! This module provides:
//! - The `InferenceClient` capability the captioner depends on
//! - An Ollama-backed implementation talking to a local model server

pub mod inference;
pub mod ollama_client;

pub use inference::{GenerateRequest, InferenceClient};
pub use ollama_client::OllamaClient;
