// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Load/render coordinator
//!
//! Loads may arrive before the window exists, before the script runtime is
//! attached, or faster than frames are drawn. The coordinator installs the
//! latest successful scene exactly once, on the first call where both a
//! scene and a window are available.

use super::state::CoordinatorState;
use super::status::StatusChannel;
use crate::render::{MeshSynthesizer, RenderBackend, RenderModel, Shading};
use crate::scene::{ensure_source, LoadResult, SceneLoader};
use tracing::{debug, info, trace, warn};

pub const LOADING_STATUS: &str = "loading scene...";

/// Owns the active render model and decides when a loaded scene replaces it.
pub struct LoadRenderCoordinator {
    state: CoordinatorState,
    loader: Option<Box<dyn SceneLoader>>,
    synthesizer: MeshSynthesizer,
    model: RenderModel,
    /// Number of models installed so far
    revision: u64,
    status: StatusChannel,
}

impl LoadRenderCoordinator {
    /// Coordinator without a script runtime; loads stay pending until one is attached
    pub fn new(synthesizer: MeshSynthesizer) -> Self {
        Self {
            state: CoordinatorState::new(),
            loader: None,
            synthesizer,
            model: RenderModel::empty(),
            revision: 0,
            status: StatusChannel::new(),
        }
    }

    pub fn with_loader(mut self, loader: impl SceneLoader + 'static) -> Self {
        self.attach_loader(loader);
        self
    }

    /// Make the script runtime available. A request that arrived earlier is
    /// evaluated on the next ready tick.
    pub fn attach_loader(&mut self, loader: impl SceneLoader + 'static) {
        self.loader = Some(Box::new(loader));
        debug!(pending = self.state.reload_pending, "scene loader attached");
    }

    pub fn has_loader(&self) -> bool {
        self.loader.is_some()
    }

    /// The window system finished initializing; installation happens on the next tick
    pub fn mark_window_ready(&mut self) {
        self.state.window_ready = true;
        debug!("window ready");
    }

    /// External load request. Supersedes any request still pending.
    pub fn install_scene(&mut self, source: &str) {
        source.clone_into(&mut self.state.pending_source);
        self.state.reload_pending = true;
        self.status.publish(LOADING_STATUS);

        if self.loader.is_some() {
            self.evaluate_pending();
        } else if let Err(err) = ensure_source(source) {
            self.state.reload_pending = false;
            self.state.scene_available = false;
            self.status.publish(format!("Error: {err}"));
        } else {
            debug!("no scene loader attached, deferring evaluation");
        }
    }

    /// Drive one render frame
    pub fn tick(&mut self, backend: &mut dyn RenderBackend) {
        if !self.state.window_ready {
            trace!("window not ready, skipping frame");
            return;
        }

        if self.state.has_deferred_request() && self.loader.is_some() {
            self.evaluate_pending();
        }

        if self.state.needs_install() {
            self.install_current_scene();
        }

        backend.draw_frame(&self.model, self.status.read());
    }

    /// Replace the shading parameters, rebuilding the displayed scene with them
    pub fn set_shading(&mut self, shading: Shading) {
        self.synthesizer = MeshSynthesizer::new(shading);
        if self.state.scene_installed && self.state.window_ready {
            self.install_current_scene();
        }
    }

    pub fn status(&self) -> &str {
        self.status.read()
    }

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn active_model(&self) -> &RenderModel {
        &self.model
    }

    /// Incremented each time a model is installed, even one equal to the previous
    pub fn model_revision(&self) -> u64 {
        self.revision
    }

    pub fn synthesizer(&self) -> &MeshSynthesizer {
        &self.synthesizer
    }

    fn evaluate_pending(&mut self) {
        let Some(loader) = self.loader.as_ref() else {
            return;
        };

        let result = loader.load(&self.state.pending_source);
        self.state.reload_pending = false;

        match result {
            LoadResult::Success { handle, message } => {
                self.state.scene = Some(handle);
                self.state.scene_available = true;
                self.state.scene_installed = false;
                self.status.publish(message);

                if self.state.window_ready {
                    self.install_current_scene();
                }
            }
            LoadResult::Failure(err) => {
                self.state.scene_available = false;
                self.status.publish(format!("Error: {err}"));
            }
        }
    }

    /// Synthesize the retained scene and swap it in as the active model.
    /// On rejection the previous model stays on screen.
    fn install_current_scene(&mut self) {
        let Some(handle) = self.state.scene.as_ref() else {
            return;
        };

        match self.synthesizer.synthesize(&handle.boundary_mesh()) {
            Ok(model) => {
                info!(
                    vertices = model.vertex_count(),
                    triangles = model.triangle_count(),
                    "installed render model"
                );
                self.model = model;
                self.revision += 1;
                self.state.scene_installed = true;
            }
            Err(err) => {
                warn!(error = %err, "scene mesh rejected");
                self.state.scene_available = false;
                self.state.scene_installed = false;
                self.status.publish(format!("Error: {err}"));
            }
        }
    }
}

impl Default for LoadRenderCoordinator {
    fn default() -> Self {
        Self::new(MeshSynthesizer::default())
    }
}
