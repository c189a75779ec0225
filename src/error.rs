// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for scene loading and mesh synthesis

use thiserror::Error;

/// Why a scene script could not be turned into a geometry handle.
///
/// The `Display` text of each variant is the message shown to the user
/// through the status channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no scene code provided")]
    EmptySource,

    /// Compile, import resolution or execution failed inside the script engine.
    /// Carries the engine's description verbatim.
    #[error("{message}")]
    Script { message: String },

    #[error("scene module must export '{name}'")]
    MissingExport { name: String },

    #[error("exported '{name}' is not a manifold")]
    NotAManifold { name: String },
}

/// A boundary mesh the synthesizer refuses to convert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("vertex stride {stride} is too small, positions need 3 properties")]
    InvalidStride { stride: usize },

    #[error("{buffer} buffer has {len} entries, not a multiple of {stride}")]
    TruncatedBuffer {
        buffer: &'static str,
        len: usize,
        stride: usize,
    },

    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh has {vertex_count} vertices, more than 16-bit indices can address ({max})")]
    IndexOverflow { vertex_count: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_messages() {
        assert_eq!(LoadError::EmptySource.to_string(), "no scene code provided");
        assert_eq!(
            LoadError::MissingExport { name: "scene".into() }.to_string(),
            "scene module must export 'scene'"
        );
        assert_eq!(
            LoadError::NotAManifold { name: "scene".into() }.to_string(),
            "exported 'scene' is not a manifold"
        );
        assert_eq!(
            LoadError::Script { message: "Syntax error (line 1)".into() }.to_string(),
            "Syntax error (line 1)"
        );
    }
}
