//! Host glue (policy layer).
//!
//! Creates the window and GL context with winit + glutin and exposes them to the render loop
//! through [`quadloop_runtime::Host`]. Kept separate so the runtime stays windowing-agnostic.

use std::any::Any;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use raw_window_handle::HasRawWindowHandle;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use quadloop_core::{EngineError, WindowConfig};
use quadloop_runtime::Host;

/// Requested context version (major, minor); the display default is used if it is unavailable.
pub const GL_VERSION: (u8, u8) = (4, 2);

/// A single window with a current GL context.
pub struct WinitHost {
    // Field order is drop order: GL objects go before the window and event loop.
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    event_loop: EventLoop<()>,
    close_requested: bool,
}

impl std::fmt::Debug for WinitHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitHost")
            .field("window", &self.window.id())
            .field("close_requested", &self.close_requested)
            .finish_non_exhaustive()
    }
}

impl WinitHost {
    /// Opens the window, makes a GL context current on it and loads glow.
    pub fn new(cfg: &WindowConfig) -> Result<(Self, glow::Context), EngineError> {
        let event_loop = EventLoop::new();

        let window_builder = WindowBuilder::new()
            .with_title(cfg.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(cfg.width),
                f64::from(cfg.height),
            ))
            .with_resizable(cfg.resizable);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_transparency(false);

        let display_builder =
            glutin_winit::DisplayBuilder::new().with_window_builder(Some(window_builder));

        // The picker has to return a config, so an empty list unwinds out of `build` with a
        // marker payload and is turned into an error here.
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            display_builder.build(&event_loop, template, |configs| {
                match pick_most_samples(configs, |c| c.num_samples()) {
                    Some(config) => config,
                    None => panic::panic_any(NoGlConfig),
                }
            })
        }));
        let (window, gl_config) = built
            .map_err(no_config_error)?
            .map_err(|e| EngineError::init(format!("DisplayBuilder.build: {e}")))?;

        let window =
            window.ok_or_else(|| EngineError::init("DisplayBuilder did not create a window"))?;
        let gl_display = gl_config.display();
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = GL_VERSION;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let fallback_context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let not_current_gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .or_else(|e| {
                    tracing::warn!(
                        error = %e,
                        major,
                        minor,
                        "requested GL version unavailable, using display default"
                    );
                    gl_display.create_context(&gl_config, &fallback_context_attributes)
                })
                .map_err(|e| EngineError::init(format!("create_context: {e}")))?
        };

        let (width, height) = {
            let s = window.inner_size();
            (s.width.max(1), s.height.max(1))
        };

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| EngineError::init(format!("create_window_surface: {e}")))?
        };

        let gl_context = not_current_gl_context
            .make_current(&gl_surface)
            .map_err(|e| EngineError::init(format!("make_current: {e}")))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| match CString::new(s) {
                Ok(name) => gl_display.get_proc_address(name.as_c_str()) as *const _,
                Err(_) => std::ptr::null(),
            })
        };

        window.set_visible(true);
        tracing::info!(width, height, title = %cfg.title, "window created");

        let host = Self {
            gl_surface,
            gl_context,
            window,
            event_loop,
            close_requested: false,
        };
        Ok((host, gl))
    }
}

/// Unwind payload raised by the config picker when the display offers nothing.
struct NoGlConfig;

/// Maps a [`NoGlConfig`] unwind to an initialization error and resumes any other panic.
fn no_config_error(payload: Box<dyn Any + Send>) -> EngineError {
    if payload.is::<NoGlConfig>() {
        EngineError::init("display offered no GL configs")
    } else {
        panic::resume_unwind(payload)
    }
}

/// Returns the config with the most samples; the earliest wins a tie.
pub fn pick_most_samples<T>(
    configs: impl Iterator<Item = T>,
    samples: impl Fn(&T) -> u8,
) -> Option<T> {
    configs.reduce(|accum, config| {
        if samples(&config) > samples(&accum) {
            config
        } else {
            accum
        }
    })
}

impl Host for WinitHost {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        let window_id = self.window.id();
        let close_requested = &mut self.close_requested;

        // Drains what is queued and returns at the end of the batch instead of blocking.
        self.event_loop.run_return(|event, _, control_flow| {
            control_flow.set_poll();

            match event {
                Event::WindowEvent { window_id: id, event } if id == window_id => match event {
                    WindowEvent::CloseRequested => {
                        tracing::info!("close requested");
                        *close_requested = true;
                    }
                    // Resizable, but the viewport is left as is.
                    WindowEvent::Resized(size) => {
                        tracing::debug!(
                            width = size.width,
                            height = size.height,
                            "window resized"
                        );
                    }
                    _ => {}
                },
                Event::MainEventsCleared => control_flow.set_exit(),
                _ => {}
            }
        });
    }

    fn present(&mut self) {
        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            tracing::warn!(error = %e, "swap_buffers failed");
        }
    }
}
