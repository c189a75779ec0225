// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Synchronization of scene loads with the render loop

mod load_render;
mod state;
mod status;

pub use load_render::{LoadRenderCoordinator, LOADING_STATUS};
pub use state::CoordinatorState;
pub use status::{StatusChannel, IDLE_STATUS};
