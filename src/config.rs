// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Viewer configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::{
    Shading, DEFAULT_BASE_COLOR, DEFAULT_INTENSITY_FLOOR, DEFAULT_LIGHT_DIRECTION,
    DEFAULT_SCENE_SCALE,
};
use crate::scene::{DEFAULT_SCENE_EXPORT, DEFAULT_SCENE_MODULE};
use crate::script::ScriptLimits;

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "dingcad.toml";

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Reserved module name of the loaded scene
    pub scene_module: String,
    /// Export the scene must provide
    pub scene_export: String,
    /// Directory imports are resolved against
    pub module_root: Option<PathBuf>,
    /// Model units to renderer units
    pub scene_scale: f32,
    pub light_direction: [f32; 3],
    pub intensity_floor: f32,
    pub base_color: [u8; 3],
    /// Script sandbox limits
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_vertices: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let limits = ScriptLimits::default();
        Self {
            scene_module: DEFAULT_SCENE_MODULE.to_string(),
            scene_export: DEFAULT_SCENE_EXPORT.to_string(),
            module_root: None,
            scene_scale: DEFAULT_SCENE_SCALE,
            light_direction: DEFAULT_LIGHT_DIRECTION,
            intensity_floor: DEFAULT_INTENSITY_FLOOR,
            base_color: DEFAULT_BASE_COLOR,
            max_operations: limits.max_operations,
            max_call_levels: limits.max_call_levels,
            max_expr_depth: limits.max_expr_depth,
            max_vertices: limits.max_vertices,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ViewerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `dingcad.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `DINGCAD_*` environment variables; unparsable values are ignored
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root) = std::env::var("DINGCAD_MODULE_ROOT") {
            self.module_root = Some(PathBuf::from(root));
        }

        if let Some(scale) = std::env::var("DINGCAD_SCENE_SCALE")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.scene_scale = scale;
        }

        if let Some(ops) = std::env::var("DINGCAD_MAX_OPERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.max_operations = ops;
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn shading(&self) -> Shading {
        Shading::new(
            self.scene_scale,
            self.light_direction,
            self.intensity_floor,
            self.base_color,
        )
    }

    pub fn script_limits(&self) -> ScriptLimits {
        ScriptLimits {
            max_operations: self.max_operations,
            max_call_levels: self.max_call_levels,
            max_expr_depth: self.max_expr_depth,
            max_vertices: self.max_vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.scene_module, "scene.rhai");
        assert_eq!(config.scene_export, "scene");
        assert_eq!(config.scene_scale, 0.1);
        assert_eq!(config.base_color, [210, 210, 220]);
        assert_eq!(config.max_vertices, 1_000_000);
        assert_eq!(config.script_limits(), ScriptLimits::default());
        assert_eq!(config.shading(), Shading::default());
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("dingcad.toml");

        let config = ViewerConfig {
            module_root: Some(PathBuf::from("models")),
            scene_scale: 1.0,
            max_operations: 5_000,
            ..ViewerConfig::default()
        };
        config.save(&path)?;

        assert_eq!(ViewerConfig::from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "scene_scale = 0.5\nbase_color = [255, 0, 0]\n")?;

        let config = ViewerConfig::from_file(&path)?;
        assert_eq!(config.scene_scale, 0.5);
        assert_eq!(config.base_color, [255, 0, 0]);
        assert_eq!(config.scene_export, "scene");
        assert_eq!(config.intensity_floor, 0.3);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "scene_scale = \"large\"")?;

        assert!(ViewerConfig::from_file(&path).is_err());
        assert!(ViewerConfig::from_file(dir.path().join("missing.toml")).is_err());
        Ok(())
    }
}
