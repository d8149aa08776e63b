//! Shader program builder.
//!
//! Builds one linked program from a vertex and a fragment source through an abstract
//! [`ShadingBackend`]. Compile units never outlive a build: they are deleted after a
//! successful link and on every failure path.

use quadloop_core::{EngineError, ShaderStage, SourceLoader};

/// Upper bound (bytes) on backend diagnostic logs carried in errors.
pub const INFO_LOG_LIMIT: usize = 512;

/// Shading capability required by the builder.
///
/// Implementors assume a current graphics context for the lifetime of the value.
pub trait ShadingBackend {
    type Shader: Copy + std::fmt::Debug;
    type Program: Copy + std::fmt::Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, EngineError>;
    fn shader_source(&self, shader: Self::Shader, text: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, EngineError>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, location: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
}

/// Fixed vertex attribute location applied before linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttribBinding {
    pub location: u32,
    pub name: String,
}

impl AttribBinding {
    pub fn new(location: u32, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
        }
    }
}

/// Already-resolved text for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageSource<'a> {
    /// Resource name, used in diagnostics.
    pub name: &'a str,
    pub text: &'a str,
}

/// Resolves and compiles each stage in turn through `loader`, then links the program.
///
/// The fragment source is not looked up until the vertex stage has compiled.
pub fn build_program<B: ShadingBackend>(
    backend: &B,
    loader: &dyn SourceLoader,
    vertex_ref: &str,
    fragment_ref: &str,
    bindings: &[AttribBinding],
) -> Result<B::Program, EngineError> {
    let vs = load_and_compile(backend, loader, ShaderStage::Vertex, vertex_ref)?;
    let fs = match load_and_compile(backend, loader, ShaderStage::Fragment, fragment_ref) {
        Ok(fs) => fs,
        Err(e) => {
            backend.delete_shader(vs);
            return Err(e);
        }
    };

    link_stages(backend, (vs, vertex_ref), (fs, fragment_ref), bindings)
}

/// Same as [`build_program`] for sources that are already in memory.
pub fn build_program_from_text<B: ShadingBackend>(
    backend: &B,
    vertex: StageSource<'_>,
    fragment: StageSource<'_>,
    bindings: &[AttribBinding],
) -> Result<B::Program, EngineError> {
    let vs = compile_stage(backend, ShaderStage::Vertex, vertex)?;
    let fs = match compile_stage(backend, ShaderStage::Fragment, fragment) {
        Ok(fs) => fs,
        Err(e) => {
            backend.delete_shader(vs);
            return Err(e);
        }
    };

    link_stages(backend, (vs, vertex.name), (fs, fragment.name), bindings)
}

/// Attaches both units, applies `bindings`, links, and releases the units on every path.
fn link_stages<B: ShadingBackend>(
    backend: &B,
    (vs, vertex_name): (B::Shader, &str),
    (fs, fragment_name): (B::Shader, &str),
    bindings: &[AttribBinding],
) -> Result<B::Program, EngineError> {
    let program = match backend.create_program() {
        Ok(p) => p,
        Err(e) => {
            backend.delete_shader(vs);
            backend.delete_shader(fs);
            return Err(e);
        }
    };
    backend.attach_shader(program, vs);
    backend.attach_shader(program, fs);

    for b in bindings {
        tracing::debug!(location = b.location, name = %b.name, "bind attribute");
        backend.bind_attrib_location(program, b.location, &b.name);
    }

    backend.link_program(program);
    let linked = backend.program_link_status(program);
    let link_log = if linked {
        None
    } else {
        Some(truncate_log(backend.program_info_log(program), INFO_LOG_LIMIT))
    };

    backend.detach_shader(program, vs);
    backend.detach_shader(program, fs);
    backend.delete_shader(vs);
    backend.delete_shader(fs);

    if let Some(log) = link_log {
        backend.delete_program(program);
        tracing::error!(
            vertex = vertex_name,
            fragment = fragment_name,
            "program link failed"
        );
        return Err(EngineError::ShaderLink { log });
    }

    tracing::debug!(?program, vertex = vertex_name, fragment = fragment_name, "program linked");
    Ok(program)
}

fn load_and_compile<B: ShadingBackend>(
    backend: &B,
    loader: &dyn SourceLoader,
    stage: ShaderStage,
    name: &str,
) -> Result<B::Shader, EngineError> {
    let text = loader.load(name)?;
    compile_stage(backend, stage, StageSource { name, text: &text })
}

fn compile_stage<B: ShadingBackend>(
    backend: &B,
    stage: ShaderStage,
    source: StageSource<'_>,
) -> Result<B::Shader, EngineError> {
    let shader = backend.create_shader(stage)?;
    backend.shader_source(shader, source.text);
    backend.compile_shader(shader);

    if !backend.shader_compile_status(shader) {
        let log = truncate_log(backend.shader_info_log(shader), INFO_LOG_LIMIT);
        backend.delete_shader(shader);
        tracing::error!(%stage, source = source.name, "shader compile failed");
        return Err(EngineError::ShaderCompile {
            stage,
            source_name: source.name.to_string(),
            log,
        });
    }

    tracing::debug!(%stage, source = source.name, "shader compiled");
    Ok(shader)
}

/// Cuts `log` to at most `limit` bytes without splitting a UTF-8 sequence.
pub fn truncate_log(mut log: String, limit: usize) -> String {
    if log.len() <= limit {
        return log;
    }
    let mut end = limit;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log.truncate(end);
    log
}
