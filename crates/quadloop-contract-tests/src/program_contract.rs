use quadloop_core::{EngineError, ShaderStage, StaticSources};
use quadloop_runtime::{
    build_program, build_program_from_text, AttribBinding, ShadingBackend, StageSource,
    INFO_LOG_LIMIT,
};

use crate::fakes::{Call, FakeShading};

const QUAD_VERT: &str = include_str!("../fixtures/quad.vert");
const QUAD_FRAG: &str = include_str!("../fixtures/quad.frag");
const BROKEN_FRAG: &str = include_str!("../fixtures/broken.frag");
const MISMATCHED_FRAG: &str = include_str!("../fixtures/mismatched.frag");

fn sources() -> StaticSources {
    StaticSources::new()
        .with("vertex.shader", QUAD_VERT)
        .with("fragment.shader", QUAD_FRAG)
        .with("broken.shader", BROKEN_FRAG)
        .with("mismatched.shader", MISMATCHED_FRAG)
}

fn is_create_shader(c: &Call) -> bool {
    matches!(c, Call::CreateShader(..))
}

fn is_delete_shader(c: &Call) -> bool {
    matches!(c, Call::DeleteShader(..))
}

#[test]
fn successful_build_creates_and_deletes_exactly_two_units() {
    let gl = FakeShading::new();
    let program = build_program(&gl, &sources(), "vertex.shader", "fragment.shader", &[])
        .expect("valid pair must link");

    assert_ne!(program.0, 0, "program handle must not be null");
    assert!(gl.program_link_status(program));
    assert_eq!(gl.count(is_create_shader), 2);
    assert_eq!(gl.count(is_delete_shader), 2);
    assert_eq!(gl.live_shaders(), 0, "no compile unit may outlive the build");
    assert_eq!(gl.live_programs(), 1);
}

#[test]
fn units_are_detached_before_deletion() {
    let gl = FakeShading::new();
    let program = build_program(&gl, &sources(), "vertex.shader", "fragment.shader", &[])
        .expect("valid pair must link");

    let calls = gl.calls();
    for c in &calls {
        if let Call::DeleteShader(s) = c {
            let del = calls.iter().position(|x| x == c).unwrap();
            let det = calls
                .iter()
                .position(|x| *x == Call::Detach(program, *s))
                .expect("every unit is detached");
            assert!(det < del, "detach must precede delete for {s:?}");
        }
    }
}

#[test]
fn syntax_error_reports_offending_stage() {
    let gl = FakeShading::new();
    let err = build_program(&gl, &sources(), "vertex.shader", "broken.shader", &[])
        .expect_err("broken fragment must fail");

    match &err {
        EngineError::ShaderCompile {
            stage,
            source_name,
            log,
        } => {
            assert_eq!(*stage, ShaderStage::Fragment);
            assert_eq!(source_name, "broken.shader");
            assert!(!log.is_empty());
            assert!(log.len() <= INFO_LOG_LIMIT);
        }
        other => panic!("expected ShaderCompile, got: {other}"),
    }
    assert_eq!(gl.live_shaders(), 0, "failed build must not leak units");
    assert_eq!(gl.live_programs(), 0);
}

#[test]
fn vertex_syntax_error_stops_before_fragment() {
    let gl = FakeShading::new();
    let src = sources().with("bad.vert", "void main() { gl_Position = @; }");
    let err = build_program(&gl, &src, "bad.vert", "fragment.shader", &[])
        .expect_err("broken vertex must fail");

    assert_eq!(err.failed_stage(), Some(ShaderStage::Vertex));
    assert_eq!(gl.count(is_create_shader), 1);
    assert_eq!(gl.live_shaders(), 0);
}

#[test]
fn long_compile_logs_are_truncated() {
    let gl = FakeShading::new();
    let noisy: String = std::iter::once("void main() {\n")
        .chain(std::iter::repeat("    float x = @;\n").take(200))
        .chain(std::iter::once("}\n"))
        .collect();
    let src = sources().with("noisy.frag", noisy);

    let err = build_program(&gl, &src, "vertex.shader", "noisy.frag", &[])
        .expect_err("noisy fragment must fail");
    let EngineError::ShaderCompile { log, .. } = err else {
        panic!("expected ShaderCompile");
    };
    assert_eq!(log.len(), INFO_LOG_LIMIT);
}

#[test]
fn interface_mismatch_is_a_link_error() {
    let gl = FakeShading::new();
    let err = build_program(&gl, &sources(), "vertex.shader", "mismatched.shader", &[])
        .expect_err("mismatched interface must fail to link");

    match &err {
        EngineError::ShaderLink { log } => {
            assert!(!log.is_empty());
            assert!(log.contains("v_normal"), "unexpected log: {log}");
        }
        other => panic!("expected ShaderLink, got: {other}"),
    }
    assert_eq!(gl.live_shaders(), 0, "link failure cleans up units");
    assert_eq!(gl.live_programs(), 0, "link failure deletes the program");
}

#[test]
fn attribute_bindings_apply_before_link() {
    let gl = FakeShading::new();
    let src = sources().with(
        "unlaid.vert",
        "in vec3 pos;\nin vec2 uv;\nout vec2 v_local;\nvoid main() {\n    v_local = uv;\n}\n",
    );
    let bindings = [AttribBinding::new(0, "pos"), AttribBinding::new(3, "uv")];

    let program = build_program(&gl, &src, "unlaid.vert", "fragment.shader", &bindings)
        .expect("must link");

    assert_eq!(gl.attrib_location(program, "pos"), Some(0));
    assert_eq!(gl.attrib_location(program, "uv"), Some(3));

    let calls = gl.calls();
    let link = calls
        .iter()
        .position(|c| matches!(c, Call::Link(_)))
        .expect("link issued");
    let last_bind = calls
        .iter()
        .rposition(|c| matches!(c, Call::BindAttrib(..)))
        .expect("bindings issued");
    assert!(last_bind < link, "all bindings precede link");
}

#[test]
fn missing_vertex_source_creates_nothing() {
    let gl = FakeShading::new();
    let err = build_program(&gl, &sources(), "absent.shader", "fragment.shader", &[])
        .expect_err("absent source must fail");

    assert!(
        matches!(&err, EngineError::ResourceNotFound { name } if name == "absent.shader"),
        "got: {err}"
    );
    assert!(gl.calls().is_empty(), "nothing is created before the vertex source resolves");
}

#[test]
fn missing_fragment_source_releases_compiled_vertex() {
    let gl = FakeShading::new();
    let err = build_program(&gl, &sources(), "vertex.shader", "absent.shader", &[])
        .expect_err("absent source must fail");

    assert!(
        matches!(&err, EngineError::ResourceNotFound { name } if name == "absent.shader"),
        "got: {err}"
    );
    assert_eq!(gl.count(is_create_shader), 1, "vertex stage compiles first");
    assert_eq!(gl.live_shaders(), 0);
    assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
}

#[test]
fn vertex_compile_error_wins_over_missing_fragment() {
    let gl = FakeShading::new();
    let src = sources().with("bad.vert", "void main() { gl_Position = @; }");
    let err = build_program(&gl, &src, "bad.vert", "absent.shader", &[])
        .expect_err("broken vertex must fail");

    assert_eq!(err.failed_stage(), Some(ShaderStage::Vertex), "got: {err}");
    assert_eq!(gl.count(is_create_shader), 1);
    assert_eq!(gl.live_shaders(), 0);
}

#[test]
fn in_memory_sources_build_the_same_program() {
    let gl = FakeShading::new();
    let program = build_program_from_text(
        &gl,
        StageSource {
            name: "builtin:quad.vert",
            text: QUAD_VERT,
        },
        StageSource {
            name: "builtin:quad.frag",
            text: QUAD_FRAG,
        },
        &[],
    )
    .expect("valid pair must link");

    assert!(gl.program_link_status(program));
    assert_eq!(gl.attrib_location(program, "pos"), Some(0));
    assert_eq!(gl.live_shaders(), 0);

    let err = build_program_from_text(
        &gl,
        StageSource {
            name: "builtin:quad.vert",
            text: QUAD_VERT,
        },
        StageSource {
            name: "builtin:broken.frag",
            text: BROKEN_FRAG,
        },
        &[],
    )
    .expect_err("broken fragment must fail");
    assert!(
        matches!(&err, EngineError::ShaderCompile { source_name, .. } if source_name == "builtin:broken.frag"),
        "got: {err}"
    );
}

#[test]
fn program_creation_failure_releases_units() {
    let gl = FakeShading::new();
    gl.fail_program_creation();

    let err = build_program(&gl, &sources(), "vertex.shader", "fragment.shader", &[])
        .expect_err("program creation failure must propagate");
    assert!(matches!(err, EngineError::GlCreate(_)), "got: {err}");
    assert_eq!(gl.live_shaders(), 0);
}
