// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Single-slot status line shown by the host

use tracing::info;

pub const IDLE_STATUS: &str = "ready";

/// Last-write-wins status message. Reading never blocks and never fails.
#[derive(Debug, Clone, Default)]
pub struct StatusChannel {
    message: String,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, message: impl Into<String>) {
        self.message = message.into();
        info!(status = %self.message, "status updated");
    }

    /// Current message, or `"ready"` when nothing has been published
    pub fn read(&self) -> &str {
        if self.message.is_empty() {
            IDLE_STATUS
        } else {
            &self.message
        }
    }
}
