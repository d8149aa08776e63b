use glow::HasContext;

use quadloop_core::{EngineError, ShaderStage};
use quadloop_runtime::ShadingBackend;

/// [`ShadingBackend`] over a glow context.
#[derive(Clone, Copy)]
pub struct GlowShading<'gl> {
    gl: &'gl glow::Context,
}

impl std::fmt::Debug for GlowShading<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowShading").finish_non_exhaustive()
    }
}

impl<'gl> GlowShading<'gl> {
    /// # Safety
    /// `gl` must be current on this thread for as long as the returned value is used.
    pub unsafe fn new(gl: &'gl glow::Context) -> Self {
        Self { gl }
    }
}

pub fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

// SAFETY (all methods): the context is current per `GlowShading::new`, and every handle
// passed in was produced by this same context.
impl ShadingBackend for GlowShading<'_> {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, EngineError> {
        unsafe { self.gl.create_shader(stage_enum(stage)) }
            .map_err(|e| EngineError::GlCreate(format!("create_shader({stage}) failed: {e:?}")))
    }

    fn shader_source(&self, shader: Self::Shader, text: &str) {
        unsafe { self.gl.shader_source(shader, text) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, EngineError> {
        unsafe { self.gl.create_program() }
            .map_err(|e| EngineError::GlCreate(format!("create_program failed: {e:?}")))
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, location: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, location, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }
}
