use std::path::Path;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use quadloop_core::{AssetsRoot, DemoConfig, EngineError};
use quadloop_host_winit::WinitHost;
use quadloop_runtime::{run_loop, MonotonicClock};
use quadloop_runtime_glow::{load_quad_program, QuadRenderer};

fn main() {
    init_logging();

    if let Err(e) = run() {
        tracing::error!("{e:#}");
        eprintln!("[quadloop] error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Tries the working directory first, then the demo's own source tree.
fn find_assets() -> Result<AssetsRoot, EngineError> {
    let cwd = std::env::current_dir().map_err(|source| EngineError::Io {
        path: ".".into(),
        source,
    })?;
    AssetsRoot::discover(&cwd)
        .or_else(|_| AssetsRoot::discover(Path::new(env!("CARGO_MANIFEST_DIR"))))
}

fn run() -> anyhow::Result<()> {
    let assets = find_assets()?;
    let cfg = DemoConfig::load_from(assets.path())?;
    tracing::info!(assets = %assets.path().display(), fps = cfg.target_fps.0, "starting");

    let (mut host, gl) = WinitHost::new(&cfg.window).context("window bring-up")?;

    let program = unsafe {
        load_quad_program(&gl, &assets, &cfg.shaders.vertex, &cfg.shaders.fragment)
    }
    .context("building quad shader program")?;

    let mut renderer = unsafe { QuadRenderer::new(&gl, program)? };

    let clock = MonotonicClock::new();
    let stats = run_loop(&mut host, &mut renderer, &clock, cfg.target_fps.interval());
    tracing::info!(frames = stats.frames, iterations = stats.iterations, "exiting");

    unsafe { renderer.destroy() };
    Ok(())
}
