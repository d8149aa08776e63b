//! quadloop runtime (glow/OpenGL backend)
//
// This crate contains only the GL side of the demo:
// - the glow shading backend used by the program builder
// - quad geometry upload
// - the per-frame quad draw
//
// It does NOT contain windowing, event handling or frame pacing.
#![allow(clippy::missing_safety_doc)]

pub mod mesh;
pub mod renderer;
pub mod shading;

pub use mesh::{QuadMesh, QUAD_INDICES, QUAD_VERTICES};
pub use renderer::{load_quad_program, quad_attributes, QuadRenderer, CLEAR_COLOR};
pub use shading::GlowShading;

pub use quadloop_core::EngineError;
