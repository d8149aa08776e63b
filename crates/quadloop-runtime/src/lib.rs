#![forbid(unsafe_code)]

//! Backend-agnostic runtime.
//!
//! Defines the shading and windowing capabilities the demo needs, builds shader programs
//! through them and paces the render loop. Concrete backends live in `quadloop-runtime-glow`
//! and `quadloop-host-winit`.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod animation;
pub mod clock;
pub mod host;
pub mod program;
pub mod schedule;

pub use animation::{quad_offset_x, QuadUniforms};
pub use clock::{Clock, FrameClock, ManualClock, MonotonicClock};
pub use host::{run_loop, FrameCtx, FrameRenderer, Host, LoopStats};
pub use program::{
    build_program, build_program_from_text, truncate_log, AttribBinding, ShadingBackend,
    StageSource, INFO_LOG_LIMIT,
};
pub use schedule::{frame_interval, FrameScheduler};

pub use quadloop_core::{EngineError, ShaderStage};
