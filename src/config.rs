use crate::error::Result;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    TractOnnx,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    Stretch,
    Letterbox,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub top_k: usize,
    pub resize: ResizeMode,
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("models/mobilenetv2-7.onnx"),
            labels_path: PathBuf::from("models/synset.txt"),
            input_shape: (224, 224),
            top_k: 3,
            resize: ResizeMode::Stretch,
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    pub model: ModelConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::TractOnnx,
            model: ModelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    StillFile,
    Fake,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub kind: CameraKind,
    /// Latest frame written by an external capture tool.
    pub snapshot_path: PathBuf,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            kind: CameraKind::StillFile,
            snapshot_path: PathBuf::from("webcam/latest.jpg"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Decision Maker".to_string(),
            width: 720.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decision_threshold: f32,
    pub probability_decimals: usize,
    pub logger_utc_offset_hours: i32,
    pub classifier: ClassifierConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decision_threshold: 0.8,
            probability_decimals: 4,
            logger_utc_offset_hours: 0,
            classifier: ClassifierConfig::default(),
            camera: CameraConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn logger_timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.logger_utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}
