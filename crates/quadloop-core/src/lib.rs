#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod assets;
pub mod config;
pub mod error;

pub use assets::{AssetsRoot, SourceLoader, StaticSources};
pub use config::{load_typed_json, DemoConfig, FrameRate, ShaderConfig, WindowConfig};
pub use error::{EngineError, ShaderStage};
