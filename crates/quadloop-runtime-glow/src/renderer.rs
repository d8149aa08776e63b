use glow::HasContext;

use quadloop_core::{EngineError, SourceLoader};
use quadloop_runtime::{build_program, AttribBinding, FrameCtx, FrameRenderer, QuadUniforms};

use crate::mesh::{QuadMesh, POSITION_ATTRIB};
use crate::shading::GlowShading;

pub const CLEAR_COLOR: [f32; 4] = [0.23, 0.5, 0.1, 0.0];

pub const POSITION_UNIFORM: &str = "position";
pub const COLOR_UNIFORM: &str = "color";

/// Attribute layout expected by the quad vertex shader.
pub fn quad_attributes() -> [AttribBinding; 1] {
    [AttribBinding::new(POSITION_ATTRIB, "pos")]
}

/// Builds the quad program from named sources.
pub unsafe fn load_quad_program(
    gl: &glow::Context,
    loader: &dyn SourceLoader,
    vertex_ref: &str,
    fragment_ref: &str,
) -> Result<glow::NativeProgram, EngineError> {
    let backend = GlowShading::new(gl);
    build_program(&backend, loader, vertex_ref, fragment_ref, &quad_attributes())
}

/// Hands `owned` to `release` when `result` is an error, so nothing owned leaks on that path.
fn release_on_err<T, R>(
    result: Result<T, EngineError>,
    owned: R,
    release: impl FnOnce(R),
) -> Result<T, EngineError> {
    if result.is_err() {
        release(owned);
    }
    result
}

/// Draws the animated quad once per scheduled frame.
pub struct QuadRenderer<'gl> {
    gl: &'gl glow::Context,
    program: glow::NativeProgram,
    mesh: QuadMesh,
    position_loc: Option<glow::NativeUniformLocation>,
    color_loc: Option<glow::NativeUniformLocation>,
}

impl std::fmt::Debug for QuadRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadRenderer")
            .field("program", &self.program)
            .field("mesh", &self.mesh)
            .field("position_loc", &self.position_loc)
            .field("color_loc", &self.color_loc)
            .finish()
    }
}

impl<'gl> QuadRenderer<'gl> {
    /// Takes ownership of `program` and uploads the quad geometry.
    ///
    /// # Safety
    /// `gl` must stay current on this thread for the renderer's lifetime.
    pub unsafe fn new(
        gl: &'gl glow::Context,
        program: glow::NativeProgram,
    ) -> Result<Self, EngineError> {
        let mesh = release_on_err(QuadMesh::new(gl), program, |p| gl.delete_program(p))?;

        let position_loc = gl.get_uniform_location(program, POSITION_UNIFORM);
        let color_loc = gl.get_uniform_location(program, COLOR_UNIFORM);
        if position_loc.is_none() {
            tracing::warn!(uniform = POSITION_UNIFORM, "uniform not active in program");
        }
        if color_loc.is_none() {
            tracing::warn!(uniform = COLOR_UNIFORM, "uniform not active in program");
        }

        Ok(Self {
            gl,
            program,
            mesh,
            position_loc,
            color_loc,
        })
    }

    /// Deletes the program and mesh. Call after the loop returns.
    pub unsafe fn destroy(mut self) {
        self.mesh.destroy(self.gl);
        self.gl.delete_program(self.program);
    }
}

impl FrameRenderer for QuadRenderer<'_> {
    fn render(&mut self, frame: &FrameCtx) {
        let gl = self.gl;
        let uniforms = QuadUniforms::at(frame.time);
        let [r, g, b, a] = CLEAR_COLOR;
        let [x, y] = uniforms.position;
        let [cr, cg, cb, ca] = uniforms.color;

        // SAFETY: context is current per `QuadRenderer::new`.
        unsafe {
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program));
            self.mesh.bind(gl);

            gl.uniform_2_f32(self.position_loc.as_ref(), x, y);
            gl.uniform_4_f32(self.color_loc.as_ref(), cr, cg, cb, ca);
            self.mesh.draw(gl);

            QuadMesh::unbind(gl);
            gl.use_program(None);
        }
    }
}
