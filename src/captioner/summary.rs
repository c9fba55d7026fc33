// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::fmt;

/// Counters accumulated over one captioning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success: usize,
    pub errors: usize,
    /// Images left out because they had no sidecar (Add/Update only)
    pub skipped: usize,
    /// Images selected for processing
    pub total: usize,
}

impl RunSummary {
    pub fn record_success(&mut self) {
        self.success += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn processed(&self) -> usize {
        self.success + self.errors
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: {} | Errors: {} | Total: {}",
            self.success, self.errors, self.total
        )
    }
}
