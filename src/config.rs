use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::traits::SurfaceSize;

/// Angle the previewed mesh turns about X and Y every frame
pub const DEFAULT_SPIN_STEP: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shape Preview".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Settings shared by every preview session; each field falls back to its
/// default when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub spin_step: f32,
    pub show_fps: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            spin_step: DEFAULT_SPIN_STEP,
            show_fps: true,
        }
    }
}

impl PreviewConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid preview config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading config: {:?}", path);

        let text = std::fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&text).context(format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(PreviewConfig::from_json("{}").unwrap(), PreviewConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = PreviewConfig::from_json(r#"{ "window": { "width": 1024 }, "spin_step": 0.02 }"#).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.spin_step, 0.02);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PreviewConfig::from_json("{ window: ").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PreviewConfig::load("/nonexistent/preview.json").unwrap_err();
        assert!(format!("{err:#}").contains("preview.json"));
    }
}
