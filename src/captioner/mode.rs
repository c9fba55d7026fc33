// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Processing mode selection

use std::fmt;

/// How sidecar description files are created or modified during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Create or overwrite description files
    #[default]
    Default,
    /// Append a new description to existing files
    Add,
    /// Regenerate existing descriptions, using the old text as context
    Update,
}

impl ProcessingMode {
    /// Resolve the mode from the `--add` / `--update` flags.
    ///
    /// Returns `None` when both flags are set.
    pub fn from_flags(add: bool, update: bool) -> Option<Self> {
        match (add, update) {
            (true, true) => None,
            (true, false) => Some(ProcessingMode::Add),
            (false, true) => Some(ProcessingMode::Update),
            (false, false) => Some(ProcessingMode::Default),
        }
    }

    /// Modes that only touch images which already have a sidecar
    pub fn requires_existing_sidecar(&self) -> bool {
        matches!(self, ProcessingMode::Add | ProcessingMode::Update)
    }

    /// Header line printed before the scan
    pub fn description(&self) -> &'static str {
        match self {
            ProcessingMode::Default => "Create/overwrite descriptions",
            ProcessingMode::Add => "Append to existing descriptions",
            ProcessingMode::Update => "Update existing descriptions",
        }
    }

    /// Verb used on the per-image success line
    pub fn success_verb(&self) -> &'static str {
        match self {
            ProcessingMode::Default => "Saved",
            ProcessingMode::Add => "Appended",
            ProcessingMode::Update => "Updated",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingMode::Default => "default",
            ProcessingMode::Add => "add",
            ProcessingMode::Update => "update",
        };
        f.write_str(name)
    }
}
