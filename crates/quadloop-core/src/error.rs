use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage of a single compile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine-level errors used across quadloop crates.
///
/// Every variant is fatal at startup; the render loop itself has no error path.
#[derive(Debug, Error)]
pub enum EngineError {
    // ---- Start-up / host ----
    #[error("initialization failed: {0}")]
    Initialization(String),

    // ---- Assets / config ----
    #[error("assets not found (starting at {})", .start_dir.display())]
    AssetsNotFound { start_dir: PathBuf },

    #[error("shader source '{name}' not found")]
    ResourceNotFound { name: String },

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json parse error at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config at {}: {msg}", .path.display())]
    InvalidConfig { path: PathBuf, msg: String },

    // ---- Shading backend ----
    #[error(
        "failed to compile {stage} shader from source '{source_name}', shader info log: {log}"
    )]
    ShaderCompile {
        stage: ShaderStage,
        source_name: String,
        log: String,
    },

    #[error("failed to link shader program: {log}")]
    ShaderLink { log: String },

    #[error("backend object creation failed: {0}")]
    GlCreate(String),
}

impl EngineError {
    pub fn init<T: Into<String>>(s: T) -> Self {
        EngineError::Initialization(s.into())
    }

    /// Stage of a failed compile, if this is a compile error.
    pub fn failed_stage(&self) -> Option<ShaderStage> {
        match self {
            EngineError::ShaderCompile { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
