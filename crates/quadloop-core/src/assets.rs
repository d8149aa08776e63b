//! Shader source resolution by resource name.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::error::EngineError;

/// Resolves a shader resource name to its UTF-8 text.
pub trait SourceLoader {
    fn load(&self, name: &str) -> Result<String, EngineError>;
}

/// Filesystem-backed assets directory.
///
/// Layout:
/// ```text
/// <root>/quadloop.json        (optional)
/// <root>/shaders/<name>
/// ```
#[derive(Debug, Clone)]
pub struct AssetsRoot {
    root: PathBuf,
}

impl AssetsRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks up from `start_dir` looking for an `assets/shaders` directory.
    pub fn discover(start_dir: &Path) -> Result<Self, EngineError> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join("assets");
            if candidate.join("shaders").is_dir() {
                tracing::debug!(root = %candidate.display(), "assets root found");
                return Ok(Self::new(candidate));
            }
        }
        Err(EngineError::AssetsNotFound {
            start_dir: start_dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn shaders_dir(&self) -> PathBuf {
        self.root.join("shaders")
    }
}

impl SourceLoader for AssetsRoot {
    fn load(&self, name: &str) -> Result<String, EngineError> {
        let not_found = || EngineError::ResourceNotFound {
            name: name.to_string(),
        };

        // Names are plain relative paths; anything escaping the shaders dir is not a resource.
        let rel = Path::new(name);
        if name.is_empty()
            || !rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(not_found());
        }

        let path = self.shaders_dir().join(rel);
        if !path.is_file() {
            return Err(not_found());
        }

        std::fs::read_to_string(&path).map_err(|source| EngineError::Io { path, source })
    }
}

/// In-memory sources keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StaticSources {
    sources: HashMap<String, String>,
}

impl StaticSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(name.into(), text.into());
    }
}

impl SourceLoader for StaticSources {
    fn load(&self, name: &str) -> Result<String, EngineError> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::ResourceNotFound {
                name: name.to_string(),
            })
    }
}
