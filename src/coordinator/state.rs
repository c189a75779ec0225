// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Synchronization state between scene loading and the render loop

use crate::scene::GeometryHandle;

/// Flags reconciling window readiness, scene availability and pending reloads
#[derive(Debug, Clone, Default)]
pub struct CoordinatorState {
    pub window_ready: bool,
    pub scene_available: bool,
    pub reload_pending: bool,
    /// Text of the latest load request; overwritten, never queued
    pub pending_source: String,
    /// Latest successfully loaded scene, kept for re-synthesis
    pub scene: Option<GeometryHandle>,
    /// Whether `scene` is what the active model was built from
    pub scene_installed: bool,
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded scene is waiting for installation
    pub fn needs_install(&self) -> bool {
        self.scene_available && self.scene.is_some() && !self.scene_installed
    }

    /// A request arrived before any loader could evaluate it
    pub fn has_deferred_request(&self) -> bool {
        self.reload_pending && !self.pending_source.trim().is_empty()
    }
}
