// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod caption;

use anyhow::Result;
use clap::Parser;

const AFTER_HELP: &str = "\
Modes:
  (default)  Create/overwrite description files
  --add      Append new description to existing txt files (skip if file doesn't exist)
  --update   Update existing descriptions using LLM (skip if file doesn't exist)

Examples:
  vlm-captioner glm4-v-flash ./prompt.txt ./images
  vlm-captioner --add glm4-v-flash ./prompt.txt ./images";

/// Batch image captioner
#[derive(Parser, Debug)]
#[command(name = "vlm-captioner")]
#[command(version)]
#[command(about = "Caption a directory of images with a local vision model", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub caption: caption::CaptionArgs,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    caption::caption_directory(cli.caption).await
}
