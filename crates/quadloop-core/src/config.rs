//! Typed demo configuration.
//!
//! All fields have defaults matching the fixed demo (1280x720 "Hello Window", 60 fps,
//! `vertex.shader` / `fragment.shader`). An optional `quadloop.json` may override any subset.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// File name looked up at the assets root.
pub const CONFIG_FILE_NAME: &str = "quadloop.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello Window".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaderConfig {
    pub vertex: String,
    pub fragment: String,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: "vertex.shader".to_string(),
            fragment: "fragment.shader".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub shaders: ShaderConfig,
    /// Upper bound on rendered frames per second.
    pub target_fps: FrameRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameRate(pub u32);

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(60)
    }
}

impl FrameRate {
    /// Whole-millisecond frame interval, `floor(1000 / fps)`.
    ///
    /// A rate of 0 has no interval and yields [`Duration::ZERO`], i.e. uncapped. Loaded configs
    /// never carry it: [`DemoConfig::validate`] rejects 0.
    pub fn interval(self) -> Duration {
        1000u64
            .checked_div(u64::from(self.0))
            .map_or(Duration::ZERO, Duration::from_millis)
    }
}

impl DemoConfig {
    /// Loads `quadloop.json` from `root`, falling back to defaults if the file is absent.
    pub fn load_from(root: &Path) -> Result<Self, EngineError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let cfg: DemoConfig = load_typed_json(&path)?;
        cfg.validate(&path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn validate(&self, path: &Path) -> Result<(), EngineError> {
        let invalid = |msg: &str| EngineError::InvalidConfig {
            path: path.to_path_buf(),
            msg: msg.to_string(),
        };

        if self.target_fps.0 == 0 {
            return Err(invalid("target_fps must be > 0"));
        }
        if self.target_fps.0 > 1000 {
            return Err(invalid("target_fps must be <= 1000"));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window size must be non-zero"));
        }
        if self.shaders.vertex.trim().is_empty() || self.shaders.fragment.trim().is_empty() {
            return Err(invalid("shader names must not be empty"));
        }
        Ok(())
    }
}

/// Reads and deserializes a JSON file into `T`.
pub fn load_typed_json<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| EngineError::Json {
        path: PathBuf::from(path),
        source,
    })
}
