use glow::HasContext;

use quadloop_core::EngineError;

/// Attribute location of the `vec3` position input.
pub const POSITION_ATTRIB: u32 = 0;

#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 12] = [
     0.1,  0.1, 0.0, // top right
     0.1, -0.1, 0.0, // bottom right
    -0.1, -0.1, 0.0, // bottom left
    -0.1,  0.1, 0.0, // top left
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Indexed quad geometry (VAO + VBO + EBO).
#[derive(Debug)]
pub struct QuadMesh {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ebo: glow::NativeBuffer,
    index_count: i32,
}

impl QuadMesh {
    pub unsafe fn new(gl: &glow::Context) -> Result<Self, EngineError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| EngineError::GlCreate(format!("create_vertex_array: {e}")))?;
        let vbo = gl
            .create_buffer()
            .map_err(|e| EngineError::GlCreate(format!("create_buffer(vbo): {e}")))?;
        let ebo = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
                return Err(EngineError::GlCreate(format!("create_buffer(ebo): {e}")));
            }
        };

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES[..]),
            glow::DYNAMIC_DRAW,
        );

        // The element buffer binding is VAO state; keep it bound while the VAO is.
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_INDICES[..]),
            glow::DYNAMIC_DRAW,
        );

        gl.vertex_attrib_pointer_f32(POSITION_ATTRIB, 3, glow::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(POSITION_ATTRIB);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Self {
            vao,
            vbo,
            ebo,
            index_count: QUAD_INDICES.len() as i32,
        })
    }

    pub unsafe fn bind(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
    }

    /// Draws all indices; the mesh must be bound.
    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
    }

    pub unsafe fn unbind(gl: &glow::Context) {
        gl.bind_vertex_array(None);
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
    }
}
